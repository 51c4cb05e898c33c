//! Fixture roster payloads, shaped like the attendance export.
//!
//! Entries are keyed by student name; `serde_json` keeps keys sorted, so
//! student ids follow alphabetical name order:
//!
//! | id | name         | team     | area         | latest month  |
//! |----|--------------|----------|--------------|---------------|
//! | 0  | Ana López    | FRC      | Programación | 2024-12 30:30 |
//! | 1  | Bruno Díaz   | Aztech 1 | Mecánica     | 2024-12 24:30 |
//! | 2  | Carla Méndez | Aztech 1 | Programación | 2024-12 40:15 |
//! | 3  | Diego Torres | Aztech 2 | Diseño       | 2024-12 10:00 |
//! | 4  | Elena Ruiz   | FRC      | Electrónica  | none          |
//!
//! `Aztech 3` has nobody. Ana López carries all twelve months of 2024.

use serde_json::{Map, Value, json};

/// Canonical team order used by the fixtures.
pub const TEAMS: [&str; 4] = ["FRC", "Aztech 1", "Aztech 2", "Aztech 3"];

/// Canonical area order used by the fixtures.
pub const AREAS: [&str; 4] = ["Programación", "Mecánica", "Diseño", "Electrónica"];

/// Monthly totals for Ana López, January first.
pub const ANA_MONTHLY_TOTALS: [&str; 12] = [
    "12:00", "14:30", "16:00", "18:45", "20:00", "22:15", "8:00", "10:30", "24:00", "26:45",
    "28:00", "30:30",
];

fn profile(team: &str, area: &str, group: &str, level: &str, turn: &str, average: Value) -> Value {
    json!({
        "Equipo": team,
        "Área": area,
        "Grupo": group,
        "Nivel": level,
        "Turno": turn,
        "Promedio": average,
    })
}

fn ana() -> Value {
    let mut entry = Map::new();
    entry.insert(
        "datos personales".into(),
        profile("FRC", "Programación", "5A", "Preparatoria", "Matutino", json!(96)),
    );
    for (n, total) in ANA_MONTHLY_TOTALS.iter().enumerate() {
        entry.insert(
            format!("2024-{:02}", n + 1),
            json!({ "hourstotal": total, "asistencia": "95%" }),
        );
    }
    entry.insert(
        "2024-01".into(),
        json!({
            "hourstotal": ANA_MONTHLY_TOTALS[0],
            "asistencia": 90,
            "dias": { "2024-01-08": "2:00", "2024-01-09": "3:00", "2024-01-15": "4:30" }
        }),
    );
    entry.insert(
        "2024-12".into(),
        json!({
            "hourstotal": ANA_MONTHLY_TOTALS[11],
            "asistencia": "97%",
            "dias": { "2024-12-05": "5:15", "2024-12-02": "4:00", "2024-12-03": "3:30" }
        }),
    );
    Value::Object(entry)
}

/// Well-formed roster across every team but `Aztech 3`.
#[must_use]
pub fn roster() -> Value {
    json!({
        "Ana López": ana(),
        "Bruno Díaz": {
            "datos personales": profile("Aztech 1", "Mecánica", "3B", "Secundaria", "Vespertino", json!("82")),
            "2024-11": { "hourstotal": "30:00", "asistencia": 85 },
            "2024-12": {
                "hourstotal": "24:30",
                "asistencia": 80,
                "dias": { "02/12/2024": "6:00", "03/12/2024": "6:30" }
            }
        },
        "Carla Méndez": {
            "datos personales": profile("Aztech 1", "Programación", "3A", "Secundaria", "Matutino", json!(91.5)),
            "2024-12": {
                "hourstotal": "40:15",
                "asistencia": 93,
                "dias": { "2": "8:00", "3": "8:15", "4": "8:00" }
            }
        },
        "Diego Torres": {
            "datos personales": profile("Aztech 2", "Diseño", "2C", "Secundaria", "Vespertino", json!(68)),
            "2024-12": { "hourstotal": "10:00", "asistencia": 60 }
        },
        "Elena Ruiz": {
            "datos personales": profile("FRC", "Electrónica", "6A", "Preparatoria", "Matutino", json!("77%"))
        }
    })
}

/// [`roster`] plus entries that exercise every recovery path:
///
/// - `Fabián Sin Datos` has no metadata record (omitted);
/// - `Gabriela Rota` is not an object (omitted);
/// - `Hugo Mal Mes` keeps one month: `2024-12` has a bad total and is
///   skipped, `2024-11` loses its unreadable day.
#[must_use]
pub fn messy_roster() -> Value {
    let mut payload = roster();
    if let Value::Object(entries) = &mut payload {
        entries.insert(
            "Fabián Sin Datos".into(),
            json!({ "2024-12": { "hourstotal": "12:00" } }),
        );
        entries.insert("Gabriela Rota".into(), json!("no es un objeto"));
        entries.insert(
            "Hugo Mal Mes".into(),
            json!({
                "datos personales": profile("Aztech 3", "Mecánica", "1A", "Secundaria", "Matutino", json!(88)),
                "2024-12": { "hourstotal": "7:75" },
                "2024-11": {
                    "hourstotal": "6:00",
                    "dias": { "2024-11-04": "6:00", "2024-11-05": "seis" }
                }
            }),
        );
    }
    payload
}
