//! Re-export of foundational types from `rollcall-types`.
// Consolidated re-exports so downstream crates can depend on `rollcall-core` only

pub use rollcall_types::{
    AreaAggregate, AttendanceTier, ChartSeries, SeriesPoint, TeamAggregate,
};
pub use rollcall_types::{Bucketing, RangeConfig, Selection, TimeRange};
pub use rollcall_types::{CanonicalOrder, RefreshSummary, RollcallError};
pub use rollcall_types::{
    DEFAULT_DAILY_TARGET_HOURS, DEFAULT_METADATA_KEY, RollcallConfig, RosterSchema,
};
