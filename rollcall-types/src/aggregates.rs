//! Render-ready outputs of the rollup engine and the series builder.
//!
//! These are plain data: recomputed on every query, never persisted.

use serde::{Deserialize, Serialize};

/// Attendance band used by summary cards and list badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceTier {
    /// 90% and above.
    High,
    /// From 75% up to 90%.
    Medium,
    /// Below 75%.
    Low,
}

impl AttendanceTier {
    /// Lower bound (inclusive) of the high band.
    pub const HIGH_THRESHOLD: f64 = 90.0;
    /// Lower bound (inclusive) of the medium band.
    pub const MEDIUM_THRESHOLD: f64 = 75.0;

    /// Classify an attendance percentage. Non-finite input falls into `Low`.
    #[must_use]
    pub fn from_pct(pct: f64) -> Self {
        if pct >= Self::HIGH_THRESHOLD {
            Self::High
        } else if pct >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Team-level rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAggregate {
    /// Canonical team id.
    pub team: String,
    /// Number of students on the team.
    pub headcount: usize,
    /// Rounded mean of the students' average attendance; 0 for an empty team.
    pub avg_attendance_pct: u32,
    /// Rounded mean of latest-month hours, scaled by the range multiplier.
    pub hours: f64,
}

impl TeamAggregate {
    /// Zero-valued row for a team with no students.
    #[must_use]
    pub fn empty(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            headcount: 0,
            avg_attendance_pct: 0,
            hours: 0.0,
        }
    }

    /// Attendance band of the team average.
    #[must_use]
    pub fn tier(&self) -> AttendanceTier {
        AttendanceTier::from_pct(f64::from(self.avg_attendance_pct))
    }

    /// True when the team average is strictly above 90%.
    #[must_use]
    pub const fn trending_up(&self) -> bool {
        self.avg_attendance_pct > 90
    }
}

/// Area-level rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaAggregate {
    /// Canonical area id.
    pub area: String,
    /// Number of students in the area.
    pub headcount: usize,
    /// Sum of latest-month hours, scaled by the range multiplier.
    pub total_hours: f64,
    /// Rounded mean of the students' average attendance; 0 for an empty area.
    pub avg_attendance_pct: u32,
}

impl AreaAggregate {
    /// Zero-valued row for an area with no students.
    #[must_use]
    pub fn empty(area: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            headcount: 0,
            total_hours: 0.0,
            avg_attendance_pct: 0,
        }
    }

    /// Attendance band of the area average.
    #[must_use]
    pub fn tier(&self) -> AttendanceTier {
        AttendanceTier::from_pct(f64::from(self.avg_attendance_pct))
    }
}

/// A single labeled point of a [`ChartSeries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Axis label (day of month or month key).
    pub label: String,
    /// Plotted value, in hours.
    pub value: f64,
    /// Raw text to show alongside the value, when the view carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_label: Option<String>,
}

/// Chart-ready series for a single student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Chart title.
    pub title: String,
    /// Points in render order.
    pub points: Vec<SeriesPoint>,
    /// Y-axis domain `(min, max)`.
    pub y_domain: (f64, f64),
    /// Y-axis unit suffix.
    pub y_unit: String,
    /// Whether the chart draws a horizontal reference line.
    pub show_reference_line: bool,
    /// Y value of the reference line, when shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_value: Option<f64>,
}

impl ChartSeries {
    /// Plotted values in point order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}
