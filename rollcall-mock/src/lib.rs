//! Deterministic roster sources for tests and examples.
//!
//! [`MockSource`] serves the fixture roster in [`fixtures`]; [`DynamicMockSource`]
//! is scripted at runtime through its [`DynamicMockController`].

use async_trait::async_trait;
use rollcall_core::{RollcallError, RosterSource};
use serde_json::Value;

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};

/// Which fixture payload a [`MockSource`] serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fixture {
    /// Well-formed roster across every team.
    #[default]
    Roster,
    /// Roster with malformed students, months and days mixed in.
    Messy,
    /// Empty object.
    Empty,
    /// Always fails with a source error.
    Fail,
    /// Sleeps before answering; trips short fetch timeouts.
    Slow,
}

/// Mock source for CI-safe examples. Serves static fixture data.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    fixture: Fixture,
}

impl MockSource {
    /// Source serving the well-formed fixture roster.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fixture: Fixture::Roster,
        }
    }

    /// Source serving `fixture`.
    #[must_use]
    pub const fn with_fixture(fixture: Fixture) -> Self {
        Self { fixture }
    }
}

#[async_trait]
impl RosterSource for MockSource {
    fn name(&self) -> &'static str {
        "rollcall-mock"
    }

    async fn fetch(&self) -> Result<Value, RollcallError> {
        match self.fixture {
            Fixture::Roster => Ok(fixtures::roster()),
            Fixture::Messy => Ok(fixtures::messy_roster()),
            Fixture::Empty => Ok(Value::Object(serde_json::Map::new())),
            Fixture::Fail => Err(RollcallError::source_failed(
                self.name(),
                "forced failure: fetch",
            )),
            Fixture::Slow => {
                // Long enough to trip short timeouts in tests.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(fixtures::roster())
            }
        }
    }
}
