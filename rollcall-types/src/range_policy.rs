//! Central table mapping each time range to its scaling and bucketing rules.
//!
//! Both the rollup engine and the series builder read from [`TimeRange::config`].
//! The table is an exhaustive `match`, so a new range cannot be added without
//! a policy entry; the series builder in turn matches on [`Bucketing`], so a
//! new bucketing rule cannot be added without a series branch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RollcallError;

/// Time granularity selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    /// Latest month, day-by-day.
    #[default]
    #[serde(rename = "1M")]
    Monthly,
    /// Three-month window.
    #[serde(rename = "3M")]
    Quarterly,
    /// Full year.
    #[serde(rename = "1Y")]
    Annual,
}

/// How the series builder buckets a student's history for a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bucketing {
    /// One point per day of a single resolved month.
    DailyInMonth,
    /// One point per month for the trailing `n` entries of the stored month list.
    TrailingMonths(usize),
    /// One point per available month.
    AllMonths,
}

/// Policy entry bound to a [`TimeRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeConfig {
    /// Factor applied to single-month figures to project them over the range.
    ///
    /// This is an extrapolation of the latest month, not a sum over real months.
    pub multiplier: u32,
    /// Display label for the period.
    pub label: &'static str,
    /// Series bucketing rule.
    pub bucketing: Bucketing,
}

impl TimeRange {
    /// Every range, in display order.
    pub const ALL: [Self; 3] = [Self::Monthly, Self::Quarterly, Self::Annual];

    /// Policy entry for this range.
    #[must_use]
    pub const fn config(self) -> RangeConfig {
        match self {
            Self::Monthly => RangeConfig {
                multiplier: 1,
                label: "Mensual",
                bucketing: Bucketing::DailyInMonth,
            },
            Self::Quarterly => RangeConfig {
                multiplier: 3,
                label: "Trimestral",
                bucketing: Bucketing::TrailingMonths(3),
            },
            // 10, not 12: kept as the dashboard has always projected it.
            Self::Annual => RangeConfig {
                multiplier: 10,
                label: "Anual",
                bucketing: Bucketing::AllMonths,
            },
        }
    }

    /// Shorthand for `self.config().multiplier`.
    #[must_use]
    pub const fn multiplier(self) -> u32 {
        self.config().multiplier
    }

    /// Shorthand for `self.config().label`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.config().label
    }

    /// Wire code used by selectors (`1M`, `3M`, `1Y`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Monthly => "1M",
            Self::Quarterly => "3M",
            Self::Annual => "1Y",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TimeRange {
    type Err = RollcallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1M" => Ok(Self::Monthly),
            "3M" => Ok(Self::Quarterly),
            "1Y" => Ok(Self::Annual),
            other => Err(RollcallError::InvalidArg(format!(
                "unknown time range {other:?} (expected 1M, 3M or 1Y)"
            ))),
        }
    }
}

/// Explicit query context: the selected range and, for monthly views, an
/// optional month key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Selected time range.
    pub range: TimeRange,
    /// Month key to show in the monthly view; ignored by other ranges.
    pub month: Option<String>,
}

impl Selection {
    /// Selection for `range` with no month key.
    #[must_use]
    pub const fn new(range: TimeRange) -> Self {
        Self { range, month: None }
    }

    /// Monthly selection pinned to `month`.
    pub fn monthly(month: impl Into<String>) -> Self {
        Self {
            range: TimeRange::Monthly,
            month: Some(month.into()),
        }
    }

    /// Replace the month key.
    #[must_use]
    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }
}

impl From<TimeRange> for Selection {
    fn from(range: TimeRange) -> Self {
        Self::new(range)
    }
}
