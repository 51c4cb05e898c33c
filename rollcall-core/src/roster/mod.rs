//! Normalized in-memory roster.
//!
//! A [`Roster`] is replaced wholesale on every refresh and never mutated in
//! place; all aggregates are derived from it on demand.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::duration::{Duration, Hours};
use crate::{AttendanceTier, RollcallError};

/// Raw payload ingestion and validation.
pub mod ingest;

pub use ingest::{LoadReport, build_roster, build_roster_from_str, day_of_month};

/// Stable student identifier: position of the entry in the raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u32);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One day of attendance within a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Raw day label from the payload.
    pub key: String,
    /// Day of month derived from the label (1..=31).
    pub day: u32,
    /// Hours attended that day.
    pub hours: Duration,
}

/// One month of attendance for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    /// Month label, e.g. `"marzo_2024"`.
    pub key: String,
    /// Month total as reported by the source. Trusted as-is; it is not
    /// re-derived from `days`.
    pub hours_total: Duration,
    /// Attendance percentage for the month, in `[0, 100]`.
    pub attendance_pct: f64,
    /// Day entries ordered by day of month.
    pub days: Vec<DayEntry>,
}

impl MonthRecord {
    /// Month with a total and no day breakdown.
    pub fn new(key: impl Into<String>, hours_total: Duration) -> Self {
        Self {
            key: key.into(),
            hours_total,
            attendance_pct: 0.0,
            days: Vec::new(),
        }
    }

    /// Set the attendance percentage.
    #[must_use]
    pub const fn with_attendance(mut self, pct: f64) -> Self {
        self.attendance_pct = pct;
        self
    }

    /// Append a day entry, keeping entries ordered by day of month.
    #[must_use]
    pub fn with_day(mut self, key: impl Into<String>, day: u32, hours: Duration) -> Self {
        self.days.push(DayEntry {
            key: key.into(),
            day,
            hours,
        });
        sort_days(&mut self.days);
        self
    }
}

pub(crate) fn sort_days(days: &mut [DayEntry]) {
    days.sort_by(|a, b| a.day.cmp(&b.day).then_with(|| a.key.cmp(&b.key)));
}

/// A student with their metadata and month history.
///
/// Invariant: `months` is sorted by key descending, so `months[0]` is the
/// most recent month. Use [`Student::with_months`] to keep it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Stable identifier.
    pub id: StudentId,
    /// Display name (payload key).
    pub name: String,
    /// Team id.
    pub team: String,
    /// Area id.
    pub area: String,
    /// School group.
    pub group: String,
    /// School level.
    pub level: String,
    /// School shift.
    pub turn: String,
    /// Overall attendance percentage, in `[0, 100]`.
    pub average_attendance_pct: f64,
    /// Month history, most recent first.
    pub months: Vec<MonthRecord>,
}

impl Student {
    /// Student with empty group/level/turn and no months.
    pub fn new(
        id: StudentId,
        name: impl Into<String>,
        team: impl Into<String>,
        area: impl Into<String>,
        average_attendance_pct: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            team: team.into(),
            area: area.into(),
            group: String::new(),
            level: String::new(),
            turn: String::new(),
            average_attendance_pct,
            months: Vec::new(),
        }
    }

    /// Replace the month history, restoring the descending key order.
    #[must_use]
    pub fn with_months(mut self, months: Vec<MonthRecord>) -> Self {
        self.months = months;
        sort_months(&mut self.months);
        self
    }

    /// Most recent month, if any.
    #[must_use]
    pub fn latest_month(&self) -> Option<&MonthRecord> {
        self.months.first()
    }

    /// Month with exactly `key`, if present.
    #[must_use]
    pub fn month(&self, key: &str) -> Option<&MonthRecord> {
        self.months.iter().find(|m| m.key == key)
    }

    /// Most recent month's total, or `"0:00"` when there are no months.
    #[must_use]
    pub fn total_hours_month(&self) -> Duration {
        self.latest_month()
            .map_or_else(Duration::zero, |m| m.hours_total.clone())
    }

    /// Decimal hours of [`Student::total_hours_month`].
    #[must_use]
    pub fn latest_hours(&self) -> Hours {
        self.latest_month().map_or(0.0, |m| m.hours_total.hours())
    }

    /// Attendance band of the overall average.
    #[must_use]
    pub fn tier(&self) -> AttendanceTier {
        AttendanceTier::from_pct(self.average_attendance_pct)
    }
}

/// Sort months by key descending (reverse lexicographic on the label).
pub(crate) fn sort_months(months: &mut [MonthRecord]) {
    months.sort_by(|a, b| b.key.cmp(&a.key));
}

/// Set of students keyed by id, iterated in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    students: Vec<Student>,
    index: HashMap<StudentId, usize>,
}

impl Roster {
    /// Build a roster from students.
    ///
    /// # Errors
    /// Returns `RollcallError::InvalidArg` if two students share an id.
    pub fn new(students: Vec<Student>) -> Result<Self, RollcallError> {
        let mut index: HashMap<StudentId, usize> = HashMap::with_capacity(students.len());
        for (pos, student) in students.iter().enumerate() {
            if index.insert(student.id, pos).is_some() {
                return Err(RollcallError::InvalidArg(format!(
                    "duplicate student id {}",
                    student.id
                )));
            }
        }
        Ok(Self { students, index })
    }

    /// Roster with no students.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a student by id.
    #[must_use]
    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.index.get(&id).and_then(|&pos| self.students.get(pos))
    }

    /// Iterate students in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Student> {
        self.students.iter()
    }

    /// Borrow all students in load order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Number of students.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// True when the roster has no students.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Student;
    type IntoIter = std::slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.students.iter()
    }
}
