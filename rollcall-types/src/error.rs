use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the rollcall workspace.
///
/// Per-value and per-record problems (`MalformedDuration`, `MalformedRoster`)
/// are normally recovered at the roster boundary and reported as warnings;
/// only `RosterLoad` fails a whole roster build.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RollcallError {
    /// A duration string does not follow the `H:MM` shape.
    #[error("malformed duration {input:?}: {reason}")]
    MalformedDuration {
        /// The offending raw text.
        input: String,
        /// Human-readable description of the violation.
        reason: String,
    },

    /// A student entry lacks required metadata or has an invalid shape.
    #[error("malformed roster entry for {student}: {reason}")]
    MalformedRoster {
        /// Student name (payload key) the entry belongs to.
        student: String,
        /// Human-readable description of the violation.
        reason: String,
    },

    /// A monthly series was requested for a student with no months.
    #[error("no monthly data for {student}")]
    MissingMonth {
        /// Student name.
        student: String,
    },

    /// The raw roster payload is not usable at all.
    #[error("roster load failed: {0}")]
    RosterLoad(String),

    /// The roster source returned an error.
    #[error("{source_name} failed: {msg}")]
    Source {
        /// Source name that failed.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The roster source did not answer within the configured timeout.
    #[error("roster source timed out: {source_name}")]
    SourceTimeout {
        /// Source name that timed out.
        source_name: String,
    },

    /// A resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "student 4".
        what: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl RollcallError {
    /// Helper: build a `MalformedDuration` error.
    pub fn malformed_duration(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDuration {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build a `MalformedRoster` error.
    pub fn malformed_roster(student: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRoster {
            student: student.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build a `MissingMonth` error.
    pub fn missing_month(student: impl Into<String>) -> Self {
        Self::MissingMonth {
            student: student.into(),
        }
    }

    /// Helper: build a `Source` error with the source name and message.
    pub fn source_failed(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `SourceTimeout` error.
    pub fn source_timeout(source_name: impl Into<String>) -> Self {
        Self::SourceTimeout {
            source_name: source_name.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// A missing month is reported as "no data" rather than a failure, and
    /// value-level duration problems are recovered locally.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(
            self,
            Self::MissingMonth { .. } | Self::MalformedDuration { .. } | Self::NotFound { .. }
        )
    }
}
