//! rollcall-core
//!
//! Pure transforms that turn a raw attendance roster into chart- and
//! card-ready rollups.
//!
//! - `duration`: the `H:MM` parser and the validated `Duration` value.
//! - `roster`: the normalized roster model and its ingestion stage.
//! - `rollup`: team and area aggregates for a time range.
//! - `series`: per-student chart series for a time range.
//! - `filter`: student list search and selectors.
//! - `source`: the `RosterSource` trait implemented by payload suppliers.
//!
//! Every function here is synchronous and side-effect free; the only async
//! surface is [`RosterSource::fetch`], which callers drive themselves.
#![warn(missing_docs)]

/// Duration string parsing.
pub mod duration;
/// Student list filtering.
pub mod filter;
/// Team and area rollups.
pub mod rollup;
/// Roster model and ingestion.
pub mod roster;
/// Per-student chart series.
pub mod series;
/// Roster payload sources.
pub mod source;
pub mod types;

pub use duration::{Duration, Hours, parse_duration};
pub use filter::{StudentFilter, filter_students};
pub use rollup::{area_stats, team_stats};
pub use roster::{
    DayEntry, LoadReport, MonthRecord, Roster, Student, StudentId, build_roster,
    build_roster_from_str,
};
pub use series::{build_series, build_series_with_target, resolve_month};
pub use source::{RosterSource, StaticSource};
pub use types::*;
