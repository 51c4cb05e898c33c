mod helpers;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use helpers::{dynamic_rollcall, fixture_rollcall};
use rollcall::{Rollcall, RollcallError, Roster, RosterSource, Student, StudentId};
use rollcall_mock::fixtures;
use rollcall_mock::{Fixture, MockBehavior};
use serde_json::{Value, json};
use tokio::sync::Notify;

/// Source that parks each fetch until the test releases it.
struct GatedSource {
    entered: Notify,
    release: Notify,
    payload: Value,
}

#[async_trait]
impl RosterSource for GatedSource {
    fn name(&self) -> &'static str {
        "gated"
    }

    async fn fetch(&self) -> Result<Value, RollcallError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.payload.clone())
    }
}

#[tokio::test]
async fn starts_empty_until_refreshed() {
    let rollcall = fixture_rollcall(Fixture::Roster);
    assert!(rollcall.snapshot().is_empty());

    let summary = rollcall.refresh().await.unwrap();
    assert_eq!(summary.source, "rollcall-mock");
    assert_eq!(summary.students, 5);
    assert_eq!(summary.omitted, 0);
    assert!(summary.is_clean());
    assert_eq!(rollcall.snapshot().len(), 5);
}

#[tokio::test]
async fn messy_payload_refreshes_with_warnings() {
    let rollcall = fixture_rollcall(Fixture::Messy);
    let summary = rollcall.refresh().await.unwrap();
    assert_eq!(summary.students, 6);
    assert_eq!(summary.omitted, 2);
    assert_eq!(summary.warnings.len(), 4);
    assert!(!summary.is_clean());
    assert!(
        summary
            .warnings
            .iter()
            .any(|w| matches!(w, RollcallError::MalformedRoster { student, .. } if student == "Gabriela Rota"))
    );
}

#[tokio::test]
async fn source_failure_keeps_previous_roster() {
    let (rollcall, _source, controller) = dynamic_rollcall(Duration::from_secs(1));
    controller.set_payload(fixtures::roster()).await;
    rollcall.refresh().await.unwrap();
    let before = rollcall.snapshot();

    controller
        .set_behavior(MockBehavior::Fail(RollcallError::source_failed("P0", "boom")))
        .await;
    let err = rollcall.refresh().await.unwrap_err();
    assert_eq!(err, RollcallError::source_failed("P0", "boom"));
    assert!(Arc::ptr_eq(&before, &rollcall.snapshot()));
    assert_eq!(controller.calls(), 2);
}

#[tokio::test]
async fn untagged_source_errors_carry_the_source_name() {
    let (rollcall, _source, controller) = dynamic_rollcall(Duration::from_secs(1));
    controller
        .set_behavior(MockBehavior::Fail(RollcallError::not_found("export")))
        .await;
    match rollcall.refresh().await.unwrap_err() {
        RollcallError::Source { source_name, msg } => {
            assert_eq!(source_name, "P0");
            assert!(msg.contains("export"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn hanging_source_times_out_and_keeps_previous_roster() {
    let (rollcall, _source, controller) = dynamic_rollcall(Duration::from_millis(50));
    controller.set_payload(fixtures::roster()).await;
    rollcall.refresh().await.unwrap();

    controller.set_behavior(MockBehavior::Hang).await;
    let err = rollcall.refresh().await.unwrap_err();
    assert_eq!(
        err,
        RollcallError::SourceTimeout {
            source_name: "P0".into()
        }
    );
    assert_eq!(rollcall.snapshot().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn slow_fixture_trips_a_short_timeout() {
    let rollcall = rollcall::Rollcall::builder()
        .with_source(Arc::new(rollcall_mock::MockSource::with_fixture(Fixture::Slow)))
        .fetch_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = rollcall.refresh().await.unwrap_err();
    assert!(matches!(err, RollcallError::SourceTimeout { .. }));
    assert!(rollcall.snapshot().is_empty());
}

#[tokio::test]
async fn unusable_payload_fails_the_refresh_only() {
    let (rollcall, _source, controller) = dynamic_rollcall(Duration::from_secs(1));
    controller.set_payload(fixtures::roster()).await;
    rollcall.refresh().await.unwrap();

    controller.set_payload(json!(["not", "a", "roster"])).await;
    let err = rollcall.refresh().await.unwrap_err();
    assert!(matches!(err, RollcallError::RosterLoad(_)));
    assert_eq!(rollcall.snapshot().len(), 5);
}

#[tokio::test]
async fn old_snapshots_survive_a_refresh() {
    let (rollcall, _source, controller) = dynamic_rollcall(Duration::from_secs(1));
    controller.set_payload(fixtures::roster()).await;
    rollcall.refresh().await.unwrap();
    let old = rollcall.snapshot();

    controller.set_payload(json!({})).await;
    rollcall.refresh().await.unwrap();

    assert_eq!(old.len(), 5);
    assert!(rollcall.snapshot().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_only_ever_see_whole_rosters() {
    let (rollcall, _source, controller) = dynamic_rollcall(Duration::from_secs(1));
    let rollcall = Arc::new(rollcall);

    let mut readers = Vec::new();
    for _ in 0..4 {
        let rc = Arc::clone(&rollcall);
        readers.push(tokio::spawn(async move {
            for _ in 0..200 {
                let len = rc.snapshot().len();
                assert!(len == 0 || len == 5, "partial roster of {len}");
                tokio::task::yield_now().await;
            }
        }));
    }
    for i in 0..20 {
        let payload = if i % 2 == 0 { fixtures::roster() } else { json!({}) };
        controller.set_payload(payload).await;
        rollcall.refresh().await.unwrap();
    }
    for r in readers {
        r.await.unwrap();
    }
}

#[tokio::test]
async fn replace_roster_and_load_bypass_the_source() {
    let (rollcall, _source, controller) = dynamic_rollcall(Duration::from_secs(1));
    let roster = Roster::new(vec![Student::new(StudentId(9), "Iván", "FRC", "Mecánica", 99.0)]).unwrap();
    rollcall.replace_roster(roster);
    assert_eq!(rollcall.student(StudentId(9)).unwrap().name, "Iván");

    let summary = rollcall.load(&fixtures::messy_roster()).unwrap();
    assert_eq!(summary.omitted, 2);
    assert_eq!(rollcall.snapshot().len(), 6);
    assert_eq!(controller.calls(), 0);
}

#[tokio::test]
async fn replacement_during_fetch_is_not_overwritten() {
    let source = Arc::new(GatedSource {
        entered: Notify::new(),
        release: Notify::new(),
        payload: fixtures::roster(),
    });
    let rollcall = Arc::new(Rollcall::builder().with_source(source.clone()).build().unwrap());

    let rc = Arc::clone(&rollcall);
    let in_flight = tokio::spawn(async move { rc.refresh().await });
    source.entered.notified().await;

    let newer = Roster::new(vec![Student::new(StudentId(9), "Iván", "FRC", "Mecánica", 99.0)]).unwrap();
    rollcall.replace_roster(newer);
    source.release.notify_one();

    let summary = in_flight.await.unwrap().unwrap();
    assert_eq!(summary.students, 5);
    assert_eq!(rollcall.snapshot().len(), 1);
    assert_eq!(rollcall.student(StudentId(9)).unwrap().name, "Iván");

    // A refresh that starts afterwards swaps in as usual.
    source.release.notify_one();
    rollcall.refresh().await.unwrap();
    assert_eq!(rollcall.snapshot().len(), 5);
}

#[tokio::test]
async fn load_during_fetch_is_not_overwritten() {
    let source = Arc::new(GatedSource {
        entered: Notify::new(),
        release: Notify::new(),
        payload: json!({}),
    });
    let rollcall = Arc::new(Rollcall::builder().with_source(source.clone()).build().unwrap());

    let rc = Arc::clone(&rollcall);
    let in_flight = tokio::spawn(async move { rc.refresh().await });
    source.entered.notified().await;

    rollcall.load(&fixtures::roster()).unwrap();
    source.release.notify_one();

    let summary = in_flight.await.unwrap().unwrap();
    assert_eq!(summary.students, 0);
    assert_eq!(rollcall.snapshot().len(), 5);
}
