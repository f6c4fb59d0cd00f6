//! Mock event handler for testing.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! scaile-webhook = { version = "...", features = ["test-utils"] }
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use crate::{Error, EventHandler, EventKind, Result, WebhookEvent};

#[derive(Debug, Default)]
struct MockState {
    new_data: AtomicU32,
    delete_data: AtomicU32,
    invoked_at: Mutex<Vec<Instant>>,
}

/// Handler that counts invocations and fails on demand.
///
/// Clones share their counters, so a clone can be handed to a receiver while
/// the original is kept for assertions.
#[derive(Debug, Clone)]
pub struct MockHandler {
    state: Arc<MockState>,
    failures: u32,
    delay: Option<Duration>,
}

impl MockHandler {
    /// Creates a handler that always succeeds.
    pub fn succeeding() -> Self {
        Self::failing_times(0)
    }

    /// Creates a handler that always fails.
    pub fn failing() -> Self {
        Self::failing_times(u32::MAX)
    }

    /// Creates a handler whose first `failures` invocations fail.
    pub fn failing_times(failures: u32) -> Self {
        Self {
            state: Arc::default(),
            failures,
            delay: None,
        }
    }

    /// Sleeps for `delay` on every invocation before returning.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns the total number of invocations.
    pub fn calls(&self) -> u32 {
        self.calls_for(EventKind::NewData) + self.calls_for(EventKind::DeleteData)
    }

    /// Returns the number of invocations for a single event kind.
    pub fn calls_for(&self, kind: EventKind) -> u32 {
        match kind {
            EventKind::NewData => self.state.new_data.load(Ordering::SeqCst),
            EventKind::DeleteData => self.state.delete_data.load(Ordering::SeqCst),
            EventKind::Unknown => 0,
        }
    }

    /// Returns the instants at which the handler was entered.
    pub fn invoked_at(&self) -> Vec<Instant> {
        self.state
            .invoked_at
            .lock()
            .map(|instants| instants.clone())
            .unwrap_or_default()
    }

    async fn invoke(&self, counter: &AtomicU32) -> Result<()> {
        if let Ok(mut instants) = self.state.invoked_at.lock() {
            instants.push(Instant::now());
        }

        let previous = self.state.new_data.load(Ordering::SeqCst)
            + self.state.delete_data.load(Ordering::SeqCst);
        counter.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if previous < self.failures {
            return Err(Error::dispatch().with_message("Mock handler failure"));
        }

        Ok(())
    }
}

impl Default for MockHandler {
    fn default() -> Self {
        Self::succeeding()
    }
}

#[async_trait::async_trait]
impl EventHandler for MockHandler {
    async fn on_new_data(&self, _event: &WebhookEvent) -> Result<()> {
        self.invoke(&self.state.new_data).await
    }

    async fn on_delete_data(&self, _event: &WebhookEvent) -> Result<()> {
        self.invoke(&self.state.delete_data).await
    }
}
