//! Rollcall-specific data transfer objects, policy tables, and configuration primitives.
#![warn(missing_docs)]

mod aggregates;
/// Canonical ordering of team and area ids.
pub mod canonical;
mod config;
mod error;
/// Time range policy and query selection.
pub mod range_policy;
mod reports;

pub use aggregates::{AreaAggregate, AttendanceTier, ChartSeries, SeriesPoint, TeamAggregate};
pub use canonical::CanonicalOrder;
pub use config::{
    DEFAULT_DAILY_TARGET_HOURS, DEFAULT_METADATA_KEY, RollcallConfig, RosterSchema,
};
pub use error::RollcallError;
pub use range_policy::{Bucketing, RangeConfig, Selection, TimeRange};
pub use reports::RefreshSummary;
