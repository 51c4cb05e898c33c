//! Rollcall turns a raw attendance export into dashboard-ready numbers.
//!
//! Overview
//! - Pulls the raw roster from a [`RosterSource`] and normalizes it with
//!   `rollcall_core`; malformed students are omitted and counted, malformed
//!   months and days are skipped with a warning.
//! - Keeps the current roster behind an `Arc` snapshot. A refresh builds the
//!   next roster in full and swaps it in; readers never see a partial roster
//!   and a failed refresh leaves the previous one in place.
//! - Answers team and area rollups, per-student chart series, and student
//!   list queries against the snapshot. Every query takes an explicit
//!   [`Selection`].
//!
//! Range semantics
//! - `Monthly` (x1): daily series of one month with a reference line at the
//!   daily target.
//! - `Quarterly` (x3): per-month series of the last three stored months.
//! - `Annual` (x10): per-month series of every stored month.
//! - Rollup hours are the latest month projected by the multiplier, not a sum
//!   over the months present.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use rollcall::{Rollcall, Selection, TimeRange};
//!
//! let rollcall = Rollcall::builder()
//!     .with_source(Arc::new(MyExportSource::new("https://...")))
//!     .areas(["Programación", "Mecánica", "Diseño"])
//!     .build()?;
//!
//! let summary = rollcall.refresh().await?;
//! let teams = rollcall.team_stats(&Selection::new(TimeRange::Quarterly));
//! let chart = rollcall.series(StudentId(0), &Selection::monthly("2024-03"))?;
//! ```
//!
//! See `rollcall/examples/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

pub(crate) mod core;

pub use core::{Rollcall, RollcallBuilder};

pub use rollcall_core::{
    AreaAggregate, AttendanceTier, Bucketing, CanonicalOrder, ChartSeries, DayEntry, Duration,
    Hours, LoadReport, MonthRecord, RangeConfig, RefreshSummary, RollcallConfig, RollcallError,
    Roster, RosterSchema, RosterSource, SeriesPoint, Selection, StaticSource, Student,
    StudentFilter, StudentId, TeamAggregate, TimeRange, parse_duration,
};
pub use rollcall_types::{DEFAULT_DAILY_TARGET_HOURS, DEFAULT_METADATA_KEY};
