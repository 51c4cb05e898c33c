//! Parsing of the `H:MM` duration encoding used throughout raw attendance data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RollcallError;

/// Decimal hours (always finite and non-negative when produced by this module).
pub type Hours = f64;

const MINUTES_PER_HOUR: u64 = 60;

/// Parse a `"H:MM"` / `"HH:MM"` string into decimal hours.
///
/// Hours are an unbounded non-negative integer; minutes must be in `[0, 60)`.
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns `RollcallError::MalformedDuration` when the input does not split
/// into exactly two parts on `:`, when either part is empty or not made of
/// ASCII digits, or when minutes are 60 or more.
///
/// ```
/// use rollcall_core::parse_duration;
/// assert_eq!(parse_duration("8:30").unwrap(), 8.5);
/// assert!(parse_duration("8:75").is_err());
/// ```
pub fn parse_duration(s: &str) -> Result<Hours, RollcallError> {
    let (hours, minutes) = split_parts(s)?;
    Ok(to_hours(hours, minutes))
}

fn split_parts(s: &str) -> Result<(Hours, u64), RollcallError> {
    let trimmed = s.trim();
    let mut parts = trimmed.split(':');
    let (Some(h), Some(m), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(RollcallError::malformed_duration(
            s,
            "expected exactly one ':' separating hours and minutes",
        ));
    };

    // Hours have no upper bound, so they go straight to decimal hours.
    check_digits(s, h, "hours")?;
    let hours = h
        .parse::<Hours>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RollcallError::malformed_duration(s, "hours out of range"))?;

    check_digits(s, m, "minutes")?;
    let minutes = m
        .parse::<u64>()
        .ok()
        .filter(|v| *v < MINUTES_PER_HOUR)
        .ok_or_else(|| {
            RollcallError::malformed_duration(s, format!("minutes out of range: {m}"))
        })?;
    Ok((hours, minutes))
}

fn check_digits(input: &str, part: &str, what: &str) -> Result<(), RollcallError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RollcallError::malformed_duration(
            input,
            format!("{what} must be a non-negative integer"),
        ));
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn to_hours(hours: Hours, minutes: u64) -> Hours {
    hours + minutes as f64 / MINUTES_PER_HOUR as f64
}

/// A validated duration: the raw text as supplied plus its decimal hours.
///
/// The text is kept for display (e.g. annual chart labels); arithmetic uses
/// [`Duration::hours`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Duration {
    text: String,
    hours: Hours,
}

impl Duration {
    /// Parse and validate a duration string.
    ///
    /// # Errors
    /// Same conditions as [`parse_duration`].
    pub fn parse(s: &str) -> Result<Self, RollcallError> {
        let hours = parse_duration(s)?;
        Ok(Self {
            text: s.trim().to_string(),
            hours,
        })
    }

    /// Build a duration from whole hours and minutes, normalizing minutes
    /// above 59 into hours.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_parts(hours: u64, minutes: u64) -> Self {
        let hours = hours.saturating_add(minutes / MINUTES_PER_HOUR);
        let minutes = minutes % MINUTES_PER_HOUR;
        Self {
            text: format!("{hours}:{minutes:02}"),
            hours: to_hours(hours as Hours, minutes),
        }
    }

    /// The `"0:00"` duration.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_parts(0, 0)
    }

    /// Decimal hours.
    #[must_use]
    pub const fn hours(&self) -> Hours {
        self.hours
    }

    /// Raw text as supplied (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for Duration {
    type Error = RollcallError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Duration> for String {
    fn from(d: Duration) -> Self {
        d.text
    }
}

impl std::str::FromStr for Duration {
    type Err = RollcallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
