use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rollcall_core::{RollcallError, RosterSource};
use serde_json::Value;
use tokio::sync::Mutex;

/// Instruction for how the next fetches should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided payload immediately.
    Return(Value),
    /// Fail immediately with the provided error.
    Fail(RollcallError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

struct InternalState {
    behavior: MockBehavior,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    calls: Arc<AtomicUsize>,
}

impl DynamicMockController {
    /// Set the behavior for subsequent `fetch` calls.
    pub async fn set_behavior(&self, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.behavior = behavior;
    }

    /// Serve `payload` on subsequent fetches.
    pub async fn set_payload(&self, payload: Value) {
        self.set_behavior(MockBehavior::Return(payload)).await;
    }

    /// Number of `fetch` calls observed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Roster source whose answers are scripted through a [`DynamicMockController`].
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
    calls: Arc<AtomicUsize>,
}

impl DynamicMockSource {
    /// Create a source named `name` that initially serves an empty roster,
    /// together with its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState {
            behavior: MockBehavior::Return(Value::Object(serde_json::Map::new())),
        }));
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Arc::new(Self {
            name,
            state: Arc::clone(&state),
            calls: Arc::clone(&calls),
        });
        (source, DynamicMockController { state, calls })
    }
}

#[async_trait]
impl RosterSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self) -> Result<Value, RollcallError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Clone the rule out so the lock is not held while hanging.
        let behavior = self.state.lock().await.behavior.clone();
        match behavior {
            MockBehavior::Return(payload) => Ok(payload),
            MockBehavior::Fail(err) => Err(err),
            MockBehavior::Hang => std::future::pending().await,
        }
    }
}
