//! Student list filtering (name search plus team/area selectors).

use serde::{Deserialize, Serialize};

use crate::roster::{Roster, Student};

/// Criteria for narrowing the student list. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFilter {
    /// Case-insensitive substring of the student name.
    pub search: Option<String>,
    /// Exact team id.
    pub team: Option<String>,
    /// Exact area id.
    pub area: Option<String>,
}

impl StudentFilter {
    /// Filter that matches every student.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to names containing `term` (case-insensitive).
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict to one team.
    #[must_use]
    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Restrict to one area.
    #[must_use]
    pub fn area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// True if `student` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, student: &Student) -> bool {
        let name_ok = self.search.as_deref().map(str::trim).is_none_or(|term| {
            term.is_empty() || student.name.to_lowercase().contains(&term.to_lowercase())
        });
        let team_ok = self.team.as_deref().is_none_or(|t| student.team == t);
        let area_ok = self.area.as_deref().is_none_or(|a| student.area == a);
        name_ok && team_ok && area_ok
    }
}

/// Students matching `filter`, in roster order.
#[must_use]
pub fn filter_students<'a>(roster: &'a Roster, filter: &StudentFilter) -> Vec<&'a Student> {
    roster.iter().filter(|s| filter.matches(s)).collect()
}
