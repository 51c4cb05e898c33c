//! Configuration types shared across the engine and the facade.

use std::time::Duration;

use crate::canonical::CanonicalOrder;
use serde::{Deserialize, Serialize};

/// Key under which each student entry carries its metadata record.
pub const DEFAULT_METADATA_KEY: &str = "datos personales";

/// Daily attendance target drawn as the monthly reference line.
pub const DEFAULT_DAILY_TARGET_HOURS: f64 = 8.0;

/// Shape expectations for the raw roster payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSchema {
    /// Name of the per-student entry holding team/area/group/level/turn/average.
    /// Every other entry of a student is treated as a month record.
    pub metadata_key: String,
}

impl Default for RosterSchema {
    fn default() -> Self {
        Self {
            metadata_key: DEFAULT_METADATA_KEY.to_string(),
        }
    }
}

/// Global configuration for the `Rollcall` facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollcallConfig {
    /// Canonical team ordering; team rollups emit one row per entry.
    pub teams: CanonicalOrder,
    /// Canonical area ordering; area rollups emit one row per entry.
    pub areas: CanonicalOrder,
    /// Raw payload schema.
    pub schema: RosterSchema,
    /// Timeout for a single roster fetch.
    pub fetch_timeout: Duration,
    /// Reference line value for the monthly (daily) chart.
    pub daily_target_hours: f64,
}

impl Default for RollcallConfig {
    fn default() -> Self {
        Self {
            teams: CanonicalOrder::new(["FRC", "Aztech 1", "Aztech 2", "Aztech 3"]),
            areas: CanonicalOrder::default(),
            schema: RosterSchema::default(),
            fetch_timeout: Duration::from_secs(10),
            daily_target_hours: DEFAULT_DAILY_TARGET_HOURS,
        }
    }
}
