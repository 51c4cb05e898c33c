use std::sync::Arc;

use rollcall::{RollcallError, RosterSource, StaticSource};

/// Roster source for the examples.
///
/// Reads the export at `ROLLCALL_EXPORT` when set; otherwise serves the mock
/// fixture roster.
pub fn get_source() -> Result<Arc<dyn RosterSource>, RollcallError> {
    match std::env::var("ROLLCALL_EXPORT") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| RollcallError::RosterLoad(format!("{path}: {e}")))?;
            let payload = serde_json::from_str(&text)
                .map_err(|e| RollcallError::RosterLoad(format!("{path}: {e}")))?;
            Ok(Arc::new(StaticSource::new("export-file", payload)))
        }
        Err(_) => {
            println!("--- (Using mock roster; set ROLLCALL_EXPORT to load a file) ---");
            Ok(Arc::new(rollcall_mock::MockSource::new()))
        }
    }
}
