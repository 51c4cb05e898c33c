use async_trait::async_trait;
use serde_json::Value;

use crate::RollcallError;

/// Supplier of raw roster payloads.
///
/// Implementations own the transport (HTTP, file, fixture); the engine only
/// sees the decoded JSON. The payload is expected to be an object keyed by
/// student name; see [`build_roster`](crate::roster::build_roster).
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Human-readable, stable name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Fetch the current raw roster payload.
    async fn fetch(&self) -> Result<Value, RollcallError>;
}

/// Source that always serves the same in-memory payload.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: &'static str,
    payload: Value,
}

impl StaticSource {
    /// Wrap `payload` under `name`.
    #[must_use]
    pub const fn new(name: &'static str, payload: Value) -> Self {
        Self { name, payload }
    }
}

#[async_trait]
impl RosterSource for StaticSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self) -> Result<Value, RollcallError> {
        Ok(self.payload.clone())
    }
}
