use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{DayEntry, MonthRecord, Roster, Student, StudentId, sort_days, sort_months};
use crate::duration::Duration;
use crate::{RollcallError, RosterSchema};

/// Result of a roster build: the roster plus what was left out on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Students that passed validation, in payload order.
    pub roster: Roster,
    /// Student entries excluded for malformed metadata.
    pub omitted: usize,
    /// Every non-fatal issue, in the order encountered. Includes one
    /// `MalformedRoster` per omitted student, plus value-level skips
    /// (months and days that failed validation).
    pub warnings: Vec<RollcallError>,
}

/// Metadata record carried by each student entry.
#[derive(Debug, Deserialize)]
struct RawProfile {
    #[serde(rename = "Equipo", deserialize_with = "text")]
    team: String,
    #[serde(rename = "Área", alias = "Area", deserialize_with = "text")]
    area: String,
    #[serde(rename = "Grupo", deserialize_with = "text")]
    group: String,
    #[serde(rename = "Nivel", deserialize_with = "text")]
    level: String,
    #[serde(rename = "Turno", deserialize_with = "text")]
    turn: String,
    #[serde(rename = "Promedio", deserialize_with = "number")]
    average: f64,
}

/// Month record as found in the payload.
#[derive(Debug, Deserialize)]
struct RawMonth {
    #[serde(alias = "hoursTotal", alias = "horastotales")]
    hourstotal: String,
    #[serde(
        default,
        alias = "asistencia",
        alias = "attendancePct",
        deserialize_with = "optional_number"
    )]
    attendance: Option<f64>,
    #[serde(default, alias = "dias", alias = "días")]
    days: BTreeMap<String, Value>,
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected text, found {other}"))),
    }
}

fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    as_number(&value).ok_or_else(|| de::Error::custom(format!("expected a number, found {value}")))
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => as_number(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected a number, found {value}"))),
    }
}

/// Numbers may arrive as JSON numbers or as text such as `"92.5"` or `"92%"`.
fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn clamp_pct(pct: f64) -> f64 {
    pct.clamp(0.0, 100.0)
}

/// Day of month encoded in a day label.
///
/// Accepts `YYYY-MM-DD` and day-first `DD/MM/YY[YY]` or `DD-MM-YY[YY]` dates;
/// otherwise the first run of digits in the label is used (`"05"`,
/// `"lunes 5"`, `"5/03"`). Returns `None` when no day in `1..=31` can be read.
#[must_use]
pub fn day_of_month(label: &str) -> Option<u32> {
    let label = label.trim();
    // chrono's `%Y` takes short years, so year-first needs four digits up front.
    let year_first = label
        .split('-')
        .next()
        .is_some_and(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()));
    let formats: &[&str] = if year_first {
        &["%Y-%m-%d"]
    } else {
        &["%d/%m/%Y", "%d-%m-%Y"]
    };
    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(label, fmt) {
            return Some(date.day());
        }
    }
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    let day: u32 = digits.parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

/// Normalize a raw roster payload.
///
/// The payload must be a JSON object keyed by student name. Each value holds
/// one metadata record under `schema.metadata_key` and zero or more month
/// records keyed by month label.
///
/// Recovery is local:
/// - a student whose metadata is missing or ill-typed is excluded and counted
///   in [`LoadReport::omitted`];
/// - a month whose shape is invalid or whose `hourstotal` fails to parse is
///   skipped; the student stays;
/// - a day whose duration or label fails to parse is skipped.
///
/// Student ids are the entry positions in the payload's key order, so they do
/// not shift when earlier entries are omitted.
///
/// # Errors
/// Returns `RollcallError::RosterLoad` if the payload is not a JSON object.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "rollcall_core::roster::build_roster",
        skip(raw, schema),
        fields(metadata_key = %schema.metadata_key),
    )
)]
pub fn build_roster(raw: &Value, schema: &RosterSchema) -> Result<LoadReport, RollcallError> {
    let Value::Object(entries) = raw else {
        return Err(RollcallError::RosterLoad(format!(
            "expected an object keyed by student name, found {}",
            kind_of(raw)
        )));
    };

    let mut students: Vec<Student> = Vec::with_capacity(entries.len());
    let mut warnings: Vec<RollcallError> = Vec::new();
    let mut omitted = 0usize;

    for (pos, (name, entry)) in entries.iter().enumerate() {
        let id = u32::try_from(pos)
            .map(StudentId)
            .map_err(|_| RollcallError::RosterLoad("too many student entries".into()))?;
        match ingest_student(id, name, entry, schema, &mut warnings) {
            Ok(student) => students.push(student),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(student = %name, error = %err, "omitting malformed student entry");
                omitted += 1;
                warnings.push(err);
            }
        }
    }

    let roster = Roster::new(students)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        students = roster.len(),
        omitted,
        warnings = warnings.len(),
        "roster built"
    );

    Ok(LoadReport {
        roster,
        omitted,
        warnings,
    })
}

/// Parse `raw` as JSON and normalize it with [`build_roster`].
///
/// # Errors
/// Returns `RollcallError::RosterLoad` if `raw` is not valid JSON or not a
/// JSON object.
pub fn build_roster_from_str(raw: &str, schema: &RosterSchema) -> Result<LoadReport, RollcallError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| RollcallError::RosterLoad(format!("invalid JSON: {e}")))?;
    build_roster(&value, schema)
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn ingest_student(
    id: StudentId,
    name: &str,
    entry: &Value,
    schema: &RosterSchema,
    warnings: &mut Vec<RollcallError>,
) -> Result<Student, RollcallError> {
    let Value::Object(fields) = entry else {
        return Err(RollcallError::malformed_roster(
            name,
            format!("entry is {}, expected an object", kind_of(entry)),
        ));
    };

    let profile = fields.get(&schema.metadata_key).ok_or_else(|| {
        RollcallError::malformed_roster(
            name,
            format!("missing metadata record {:?}", schema.metadata_key),
        )
    })?;
    let profile = RawProfile::deserialize(profile)
        .map_err(|e| RollcallError::malformed_roster(name, format!("metadata: {e}")))?;
    if profile.team.is_empty() {
        return Err(RollcallError::malformed_roster(name, "metadata: empty team"));
    }
    if profile.area.is_empty() {
        return Err(RollcallError::malformed_roster(name, "metadata: empty area"));
    }

    let months = ingest_months(name, fields, schema, warnings);

    Ok(Student {
        id,
        name: name.to_string(),
        team: profile.team,
        area: profile.area,
        group: profile.group,
        level: profile.level,
        turn: profile.turn,
        average_attendance_pct: clamp_pct(profile.average),
        months,
    })
}

fn ingest_months(
    name: &str,
    fields: &Map<String, Value>,
    schema: &RosterSchema,
    warnings: &mut Vec<RollcallError>,
) -> Vec<MonthRecord> {
    let mut months: Vec<MonthRecord> = fields
        .iter()
        .filter(|(key, _)| **key != schema.metadata_key)
        .filter_map(|(key, value)| match ingest_month(name, key, value, warnings) {
            Ok(month) => Some(month),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(student = %name, month = %key, error = %err, "skipping month");
                warnings.push(err);
                None
            }
        })
        .collect();
    sort_months(&mut months);
    months
}

fn ingest_month(
    name: &str,
    key: &str,
    value: &Value,
    warnings: &mut Vec<RollcallError>,
) -> Result<MonthRecord, RollcallError> {
    let raw = RawMonth::deserialize(value)
        .map_err(|e| RollcallError::malformed_roster(name, format!("month {key}: {e}")))?;
    let hours_total = Duration::parse(&raw.hourstotal)?;

    let mut days: Vec<DayEntry> = Vec::with_capacity(raw.days.len());
    for (label, hours) in raw.days {
        match ingest_day(name, key, label, &hours) {
            Ok(day) => days.push(day),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(student = %name, month = %key, error = %err, "skipping day");
                warnings.push(err);
            }
        }
    }
    sort_days(&mut days);

    Ok(MonthRecord {
        key: key.to_string(),
        hours_total,
        attendance_pct: raw.attendance.map_or(0.0, clamp_pct),
        days,
    })
}

fn ingest_day(name: &str, month: &str, label: String, hours: &Value) -> Result<DayEntry, RollcallError> {
    let Value::String(text) = hours else {
        return Err(RollcallError::malformed_duration(
            hours.to_string(),
            format!("day {label:?} of {month} for {name}: expected H:MM text"),
        ));
    };
    let hours = Duration::parse(text)?;
    let day = day_of_month(&label).ok_or_else(|| {
        RollcallError::malformed_roster(name, format!("month {month}: unreadable day label {label:?}"))
    })?;
    Ok(DayEntry {
        key: label,
        day,
        hours,
    })
}
