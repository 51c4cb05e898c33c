//! Team and area rollups over a roster.
//!
//! Both functions are total: every canonical id yields exactly one row, an
//! empty group yields explicit zeros, and no division by zero can occur.
//! Range scaling is a projection of the latest month (`hours × multiplier`),
//! not a sum over the months actually present.

use crate::duration::Hours;
use crate::roster::{Roster, Student};
use crate::{AreaAggregate, CanonicalOrder, TeamAggregate, TimeRange};

#[derive(Debug, Default, Clone, Copy)]
struct GroupAcc {
    headcount: usize,
    attendance_sum: f64,
    hours_sum: Hours,
}

impl GroupAcc {
    fn add(&mut self, student: &Student) {
        self.headcount += 1;
        if student.average_attendance_pct.is_finite() {
            self.attendance_sum += student.average_attendance_pct.clamp(0.0, 100.0);
        }
        self.hours_sum += student.latest_hours();
    }

    fn mean_attendance(&self) -> u32 {
        round_pct(mean(self.attendance_sum, self.headcount))
    }

    fn mean_hours(&self) -> Hours {
        mean(self.hours_sum, self.headcount)
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { sum / n as f64 }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_pct(pct: f64) -> u32 {
    pct.round().clamp(0.0, 100.0) as u32
}

fn accumulate<'a, F>(roster: &'a Roster, order: &CanonicalOrder, group_of: F) -> Vec<GroupAcc>
where
    F: Fn(&'a Student) -> &'a str,
{
    let mut groups = vec![GroupAcc::default(); order.len()];
    for student in roster {
        let id = group_of(student);
        if let Some(acc) = order.rank(id).and_then(|rank| groups.get_mut(rank)) {
            acc.add(student);
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(student = %student.name, group = %id, "group is not canonical; not counted");
        }
    }
    groups
}

/// Per-team rollup in canonical team order.
///
/// - `avg_attendance_pct` = rounded mean of each student's average attendance.
/// - `hours` = rounded mean of each student's latest-month hours, times the
///   range multiplier. Rounding happens before scaling, so the quarterly value
///   is exactly three times the monthly one.
/// - Students whose team is not canonical are not counted.
#[must_use]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "rollcall_core::rollup::team_stats",
        skip(roster, teams, range),
        fields(students = roster.len(), teams = teams.len(), range = %range),
    )
)]
pub fn team_stats(roster: &Roster, teams: &CanonicalOrder, range: TimeRange) -> Vec<TeamAggregate> {
    let multiplier = f64::from(range.multiplier());
    teams
        .ids()
        .iter()
        .zip(accumulate(roster, teams, |s| s.team.as_str()))
        .map(|(team, acc)| {
            if acc.headcount == 0 {
                return TeamAggregate::empty(team.as_str());
            }
            TeamAggregate {
                team: team.clone(),
                headcount: acc.headcount,
                avg_attendance_pct: acc.mean_attendance(),
                hours: acc.mean_hours().round() * multiplier,
            }
        })
        .collect()
}

/// Per-area rollup, sorted by `total_hours` descending with ties broken by
/// area id ascending.
///
/// - `total_hours` = sum of each student's latest-month hours, times the range
///   multiplier.
/// - `avg_attendance_pct` = rounded mean of each student's average attendance.
/// - Students whose area is not canonical are not counted.
#[must_use]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "rollcall_core::rollup::area_stats",
        skip(roster, areas, range),
        fields(students = roster.len(), areas = areas.len(), range = %range),
    )
)]
pub fn area_stats(roster: &Roster, areas: &CanonicalOrder, range: TimeRange) -> Vec<AreaAggregate> {
    let multiplier = f64::from(range.multiplier());
    let mut out: Vec<AreaAggregate> = areas
        .ids()
        .iter()
        .zip(accumulate(roster, areas, |s| s.area.as_str()))
        .map(|(area, acc)| {
            if acc.headcount == 0 {
                return AreaAggregate::empty(area.as_str());
            }
            AreaAggregate {
                area: area.clone(),
                headcount: acc.headcount,
                total_hours: acc.hours_sum * multiplier,
                avg_attendance_pct: acc.mean_attendance(),
            }
        })
        .collect();
    out.sort_by(|a, b| {
        b.total_hours
            .total_cmp(&a.total_hours)
            .then_with(|| a.area.cmp(&b.area))
    });
    out
}
