//! Log capture for asserting on emitted diagnostics.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// A single captured log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Layer that keeps every event it sees.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    records: Arc<Mutex<Vec<Record>>>,
}

impl CapturedLogs {
    /// Installs the capture as the default subscriber of the current thread.
    pub fn install() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let subscriber = tracing_subscriber::registry().with(logs.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    /// Returns the records emitted at `level` under `target`.
    pub fn find(&self, level: Level, target: &str) -> Vec<Record> {
        self.records
            .lock()
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.level == level && r.target == target)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        if let Ok(mut records) = self.records.lock() {
            records.push(Record {
                level: *metadata.level(),
                target: metadata.target().to_owned(),
                message: visitor.0,
            });
        }
    }
}
