use std::sync::Arc;

use rollcall::Rollcall;
use rollcall_mock::fixtures::{AREAS, TEAMS};
use rollcall_mock::{DynamicMockController, DynamicMockSource, Fixture, MockSource};

/// Ids of the fixture students.
#[allow(dead_code)]
pub const ANA: rollcall::StudentId = rollcall::StudentId(0);
#[allow(dead_code)]
pub const CARLA: rollcall::StudentId = rollcall::StudentId(2);
#[allow(dead_code)]
pub const ELENA: rollcall::StudentId = rollcall::StudentId(4);

/// Rollcall over the static fixture with the fixture's canonical lists.
#[allow(dead_code)]
pub fn fixture_rollcall(fixture: Fixture) -> Rollcall {
    Rollcall::builder()
        .with_source(Arc::new(MockSource::with_fixture(fixture)))
        .teams(TEAMS)
        .areas(AREAS)
        .build()
        .expect("valid builder")
}

/// Rollcall over a scriptable source.
#[allow(dead_code)]
pub fn dynamic_rollcall(
    timeout: std::time::Duration,
) -> (Rollcall, Arc<DynamicMockSource>, DynamicMockController) {
    let (source, controller) = DynamicMockSource::new_with_controller("P0");
    let rollcall = Rollcall::builder()
        .with_source(source.clone())
        .teams(TEAMS)
        .areas(AREAS)
        .fetch_timeout(timeout)
        .build()
        .expect("valid builder");
    (rollcall, source, controller)
}
