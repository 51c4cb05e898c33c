use std::sync::Arc;
use std::time::Duration;

use rollcall::{Rollcall, RollcallConfig, RollcallError, RosterSchema, StaticSource};
use serde_json::json;

fn source() -> Arc<StaticSource> {
    Arc::new(StaticSource::new("static", json!({})))
}

#[test]
fn build_requires_a_source() {
    let err = Rollcall::builder().build().err().unwrap();
    assert!(matches!(err, RollcallError::InvalidArg(_)));
}

#[test]
fn build_rejects_zero_timeout() {
    let err = Rollcall::builder()
        .with_source(source())
        .fetch_timeout(Duration::ZERO)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, RollcallError::InvalidArg(msg) if msg.contains("fetch_timeout")));
}

#[test]
fn build_rejects_bad_daily_target() {
    for target in [-1.0, f64::NAN, f64::INFINITY] {
        let res = Rollcall::builder()
            .with_source(source())
            .daily_target_hours(target)
            .build();
        assert!(matches!(res, Err(RollcallError::InvalidArg(_))));
    }
}

#[test]
fn builder_applies_configuration() {
    let rollcall = Rollcall::builder()
        .with_source(source())
        .teams(["B", "A", "B"])
        .areas(["Software"])
        .schema(RosterSchema {
            metadata_key: "profile".into(),
        })
        .fetch_timeout(Duration::from_secs(2))
        .daily_target_hours(7.5)
        .build()
        .unwrap();
    let cfg = rollcall.config();
    assert_eq!(cfg.teams.ids(), ["B", "A"]);
    assert_eq!(cfg.areas.ids(), ["Software"]);
    assert_eq!(cfg.schema.metadata_key, "profile");
    assert_eq!(cfg.fetch_timeout, Duration::from_secs(2));
    assert_eq!(cfg.daily_target_hours, 7.5);
    assert_eq!(rollcall.source_name(), "static");
}

#[test]
fn whole_config_can_be_supplied() {
    let cfg = RollcallConfig {
        daily_target_hours: 4.0,
        ..RollcallConfig::default()
    };
    let rollcall = Rollcall::builder().config(cfg).with_source(source()).build().unwrap();
    assert_eq!(rollcall.config().daily_target_hours, 4.0);
    assert_eq!(rollcall.config().teams.len(), 4);
}

#[test]
fn custom_metadata_key_is_used_on_load() {
    let rollcall = Rollcall::builder()
        .with_source(source())
        .schema(RosterSchema {
            metadata_key: "profile".into(),
        })
        .build()
        .unwrap();
    let payload = json!({
        "Ana": {
            "profile": {
                "Equipo": "FRC", "Área": "Software", "Grupo": "1A",
                "Nivel": "Prepa", "Turno": "Matutino", "Promedio": 90
            }
        }
    });
    let summary = rollcall.load(&payload).unwrap();
    assert_eq!(summary.students, 1);
    assert!(summary.is_clean());
}
