//! Chart-ready series for a single student.
//!
//! The bucketing rule comes from the range policy:
//! - `DailyInMonth`: one point per day of the resolved month, fixed `[0, 12]`
//!   hours domain, reference line at the daily target.
//! - `TrailingMonths(n)`: one point per month for the last `n` entries of the
//!   stored (most-recent-first) month list, domain `[0, max + 2]`.
//! - `AllMonths`: one point per month, fixed `[0, 50]` domain with a `%` unit.
//!
//! Month resolution and window direction follow what the dashboard has always
//! shown: with no (or an unknown) month key the monthly view resolves to the
//! LAST stored month, and the trailing window is taken from the end of the
//! stored list. Neither is "corrected" here.

use crate::duration::Hours;
use crate::roster::{MonthRecord, Student};
use crate::{
    Bucketing, ChartSeries, DEFAULT_DAILY_TARGET_HOURS, RangeConfig, RollcallError, Selection,
    SeriesPoint,
};

/// Y domain of the daily chart, in hours.
pub const DAILY_Y_DOMAIN: (f64, f64) = (0.0, 12.0);
/// Y domain of the all-months chart.
pub const ALL_MONTHS_Y_DOMAIN: (f64, f64) = (0.0, 50.0);
/// Headroom added above the tallest bar of the trailing-months chart.
pub const TRAILING_HEADROOM: Hours = 2.0;

const HOURS_UNIT: &str = "hrs";
// The all-months chart plots hours under a percent unit.
const ALL_MONTHS_UNIT: &str = "%";

/// Build the series for `student` under `selection`, with the reference line
/// at [`DEFAULT_DAILY_TARGET_HOURS`].
///
/// # Errors
/// Returns `RollcallError::MissingMonth` for a monthly selection when the
/// student has no months. Other ranges never fail.
pub fn build_series(student: &Student, selection: &Selection) -> Result<ChartSeries, RollcallError> {
    build_series_with_target(student, selection, DEFAULT_DAILY_TARGET_HOURS)
}

/// Same as [`build_series`] with an explicit daily target for the reference line.
///
/// # Errors
/// Returns `RollcallError::MissingMonth` for a monthly selection when the
/// student has no months.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "rollcall_core::series::build_series",
        skip(student, selection),
        fields(student = %student.id, range = %selection.range, month = ?selection.month),
    )
)]
pub fn build_series_with_target(
    student: &Student,
    selection: &Selection,
    daily_target_hours: Hours,
) -> Result<ChartSeries, RollcallError> {
    let policy = selection.range.config();
    match policy.bucketing {
        Bucketing::DailyInMonth => {
            let month = resolve_month(student, selection.month.as_deref())?;
            Ok(daily_series(month, daily_target_hours))
        }
        Bucketing::TrailingMonths(n) => {
            let start = student.months.len().saturating_sub(n);
            Ok(trailing_series(&student.months[start..], policy))
        }
        Bucketing::AllMonths => Ok(all_months_series(&student.months, policy)),
    }
}

/// Month shown by the monthly view.
///
/// The month whose key equals `key`; otherwise the last stored month (the
/// oldest, given the most-recent-first order).
///
/// # Errors
/// Returns `RollcallError::MissingMonth` when the student has no months.
pub fn resolve_month<'a>(
    student: &'a Student,
    key: Option<&str>,
) -> Result<&'a MonthRecord, RollcallError> {
    key.and_then(|k| student.month(k))
        .or_else(|| student.months.last())
        .ok_or_else(|| RollcallError::missing_month(&student.name))
}

fn daily_series(month: &MonthRecord, target: Hours) -> ChartSeries {
    // Days are kept in day-of-month order by `MonthRecord`.
    ChartSeries {
        title: format!("Horas diarias ({})", month.key),
        points: month
            .days
            .iter()
            .map(|d| SeriesPoint {
                label: d.day.to_string(),
                value: d.hours.hours(),
                raw_label: None,
            })
            .collect(),
        y_domain: DAILY_Y_DOMAIN,
        y_unit: HOURS_UNIT.to_string(),
        show_reference_line: true,
        reference_value: Some(target),
    }
}

fn month_points(months: &[MonthRecord], with_raw: bool) -> Vec<SeriesPoint> {
    months
        .iter()
        .map(|m| SeriesPoint {
            label: m.key.clone(),
            value: m.hours_total.hours(),
            raw_label: with_raw.then(|| m.hours_total.as_str().to_string()),
        })
        .collect()
}

fn trailing_series(months: &[MonthRecord], policy: RangeConfig) -> ChartSeries {
    let points = month_points(months, false);
    let max = points.iter().map(|p| p.value).fold(0.0, f64::max);
    ChartSeries {
        title: format!("Horas por mes ({})", policy.label),
        points,
        y_domain: (0.0, max + TRAILING_HEADROOM),
        y_unit: HOURS_UNIT.to_string(),
        show_reference_line: false,
        reference_value: None,
    }
}

fn all_months_series(months: &[MonthRecord], policy: RangeConfig) -> ChartSeries {
    ChartSeries {
        title: format!("Horas por mes ({})", policy.label),
        points: month_points(months, true),
        y_domain: ALL_MONTHS_Y_DOMAIN,
        y_unit: ALL_MONTHS_UNIT.to_string(),
        show_reference_line: false,
        reference_value: None,
    }
}
