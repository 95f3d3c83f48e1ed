//! A `tracing-subscriber` layer that records events, so tests can assert on what was logged.

use spin::Mutex;
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{layer::Context, Layer};

/// A single recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedEvent {
    /// The level of the event.
    pub level: Level,
    /// The target of the event.
    pub target: String,
    /// The debug rendering of the event, including its message and fields.
    pub rendered: String,
}

/// The shared storage of a [CollectingLayer].
#[derive(Debug, Default, Clone)]
pub struct TraceStorage(pub Arc<Mutex<Vec<LoggedEvent>>>);

impl TraceStorage {
    /// Returns the rendered events logged at `level`.
    pub fn get_by_level(&self, level: Level) -> Vec<String> {
        self.0.lock().iter().filter(|e| e.level == level).map(|e| e.rendered.clone()).collect()
    }

    /// Returns the rendered events logged under `target`.
    pub fn get_by_target(&self, target: &str) -> Vec<String> {
        self.0.lock().iter().filter(|e| e.target == target).map(|e| e.rendered.clone()).collect()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    /// Returns if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

/// A layer recording every event into a [TraceStorage].
#[derive(Debug, Default)]
pub struct CollectingLayer {
    /// The storage for the recorded events.
    pub storage: TraceStorage,
}

impl CollectingLayer {
    /// Creates a new [CollectingLayer] writing into `storage`.
    pub const fn new(storage: TraceStorage) -> Self {
        Self { storage }
    }
}

impl<S: Subscriber> Layer<S> for CollectingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        self.storage.0.lock().push(LoggedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            rendered: format!("{:?}", event),
        });
    }
}
