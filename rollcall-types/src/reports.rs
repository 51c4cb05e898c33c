//! Report envelopes produced by the facade.

use serde::{Deserialize, Serialize};

use crate::error::RollcallError;

/// Summary of a roster refresh.
///
/// Carries the source that was read, how many students made it into the new
/// roster, how many were omitted, and every non-fatal warning encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RefreshSummary {
    /// Name of the roster source.
    pub source: String,
    /// Students in the roster built from the fetched payload.
    pub students: usize,
    /// Student entries excluded for malformed metadata.
    pub omitted: usize,
    /// Non-fatal issues encountered while building the roster.
    pub warnings: Vec<RollcallError>,
}

impl RefreshSummary {
    /// True when nothing was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
