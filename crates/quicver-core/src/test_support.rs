// ============================================
// File: crates/quicver-core/src/test_support.rs
// ============================================
//! Event capture for asserting which diagnostics a call emitted.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

use crate::BUG_TARGET;

/// One recorded event.
#[derive(Debug, Clone)]
pub(crate) struct RecordedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

/// Layer that keeps every event it sees.
#[derive(Clone, Default)]
pub(crate) struct EventRecorder {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl EventRecorder {
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    /// Developer-error diagnostics.
    pub fn error_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| e.level == Level::ERROR && e.target == BUG_TARGET)
            .count()
    }

    pub fn info_count(&self) -> usize {
        self.events.lock().iter().filter(|e| e.level == Level::INFO).count()
    }

    /// Values of field `name` across all events, in order.
    pub fn field_values(&self, name: &str) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .flat_map(|e| e.fields.iter())
            .filter(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let value = format!("{value:?}");
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl<S: Subscriber> Layer<S> for EventRecorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        self.events.lock().push(RecordedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Runs `f` with a recording subscriber installed on this thread.
pub(crate) fn capture_events<R>(f: impl FnOnce() -> R) -> (R, EventRecorder) {
    let recorder = EventRecorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, recorder)
}
