//! Captures diagnostics emitted while a closure runs.
//!
//! Pipeline stages report dropped rows, unknown flags and unmapped CPUs only
//! through `tracing`, so tests assert on those events directly.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

/// Layer that keeps every event it sees.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Runs `f` with a fresh recording subscriber as the thread default and
    /// returns its result together with the layer.
    ///
    /// # Examples
    /// ```
    /// use nodegroup_test_support::tracing::RecordingLayer;
    ///
    /// let (value, layer) = RecordingLayer::capture(|| {
    ///     tracing::warn!(flag = "X", "unrecognised flag code");
    ///     7
    /// });
    /// assert_eq!(value, 7);
    /// let warnings = layer.find(tracing::Level::WARN, "flag code");
    /// assert_eq!(warnings[0].field("flag"), Some("X"));
    /// ```
    pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Self) {
        let layer = Self::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        let value = tracing::subscriber::with_default(subscriber, f);
        (value, layer)
    }

    /// Returns a snapshot of recorded events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.events.lock().expect("lock poisoned").clone()
    }

    /// Returns recorded events at `level` whose message contains `needle`.
    #[must_use]
    pub fn find(&self, level: Level, needle: &str) -> Vec<EventRecord> {
        self.events()
            .into_iter()
            .filter(|event| {
                event.level == level && event.message().is_some_and(|text| text.contains(needle))
            })
            .collect()
    }

    /// Returns how many events were recorded at `level`.
    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.events()
            .iter()
            .filter(|event| event.level == level)
            .count()
    }
}

/// Snapshot of an emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Level the event was emitted at.
    pub level: Level,
    /// Event target, usually the emitting module path.
    pub target: String,
    /// Structured fields rendered as text, including `message`.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Returns the event message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    /// Returns the rendered value of `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl<S: Subscriber> Layer<S> for RecordingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder {
            fields: &mut fields,
        });
        let metadata = event.metadata();
        self.events
            .lock()
            .expect("lock poisoned")
            .push(EventRecord {
                level: *metadata.level(),
                target: metadata.target().to_owned(),
                fields,
            });
    }
}

struct FieldRecorder<'a> {
    fields: &'a mut HashMap<String, String>,
}

impl Visit for FieldRecorder<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.fields
            .insert(field.name().to_owned(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .insert(field.name().to_owned(), value.to_owned());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_owned(), value.to_string());
    }
}
