//! # Event sinks: where supervision events go.
//!
//! [`EventSink`] is the extension point for the external logging component:
//! the supervisor calls it on every state transition but does not depend on
//! how (or whether) events are persisted.
//!
//! ## Contract
//! - [`EventSink::record`] is synchronous and is called from inside the
//!   supervisor cycle; implementations must be quick and non-blocking (hand
//!   off to a queue or channel if persistence is slow).
//! - Panics inside a sink are caught by [`SinkSet::emit`] and reported on
//!   stderr; they never take down the cycle.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use super::event::SupervisorEvent;

/// Contract for event consumers.
pub trait EventSink: Send + Sync + 'static {
    /// Handles a single event.
    fn record(&self, event: &SupervisorEvent);

    /// Human-readable name (for diagnostics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Fan-out over a fixed set of sinks with panic isolation.
pub struct SinkSet {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl SinkSet {
    /// Creates a new set from the given sinks.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn EventSink>>) -> Self {
        Self { sinks }
    }

    /// Delivers one event to every sink. A panicking sink is reported and
    /// skipped; remaining sinks still see the event.
    pub fn emit(&self, event: &SupervisorEvent) {
        for sink in &self.sinks {
            let call = AssertUnwindSafe(|| sink.record(event));
            if let Err(panic_err) = catch_unwind(call) {
                eprintln!(
                    "[plantvisor] sink '{}' panicked: {:?}",
                    sink.name(),
                    panic_err
                );
            }
        }
    }

    /// True if there are no sinks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Number of sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event::EventId;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<EventId>>);

    impl EventSink for Recorder {
        fn record(&self, event: &SupervisorEvent) {
            self.0.lock().unwrap().push(event.id);
        }
    }

    struct Panicker;

    impl EventSink for Panicker {
        fn record(&self, _event: &SupervisorEvent) {
            panic!("boom");
        }
        fn name(&self) -> &'static str {
            "panicker"
        }
    }

    #[test]
    fn test_panicking_sink_does_not_starve_others() {
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let set = SinkSet::new(vec![Arc::new(Panicker), recorder.clone()]);
        set.emit(&SupervisorEvent::new(EventId::CycleOverrun));
        assert_eq!(*recorder.0.lock().unwrap(), vec![EventId::CycleOverrun]);
    }
}
