//! # LogWriter — simple event printer
//!
//! A minimal sink that prints supervision events to stdout, with a runtime
//! severity filter. Use it for tests, demos, or as a reference for a real
//! log-persistence sink.
//!
//! ## Example output
//! ```text
//! [worker-started] worker=moisture-sensor category=sensor
//! [worker-missing] worker=remote-comm category=remote-comm
//! [action-taken] worker=remote-comm category=remote-comm code=1 action=notify-only
//! [cancel-requested] worker=logger category=logging
//! [cycle-overrun] detail="drained 81 messages"
//! ```

use super::event::{Severity, SupervisorEvent};
use super::sink::EventSink;

/// Event printer with a runtime minimum-severity filter.
pub struct LogWriter {
    min: Severity,
}

impl LogWriter {
    /// Constructs a writer that prints everything (`Info` and up).
    #[must_use]
    pub fn new() -> Self {
        Self {
            min: Severity::Info,
        }
    }

    /// Constructs a writer that drops events below `min`.
    #[must_use]
    pub fn with_min(min: Severity) -> Self {
        Self { min }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogWriter {
    fn record(&self, e: &SupervisorEvent) {
        if e.severity < self.min {
            return;
        }
        let mut line = format!("[{}]", e.id.label());
        if let Some(worker) = e.worker {
            line.push_str(&format!(" worker={worker}"));
            line.push_str(&format!(" category={}", worker.category()));
        }
        if let Some(code) = e.code {
            line.push_str(&format!(" code={code}"));
        }
        if let Some(action) = e.action {
            line.push_str(&format!(" action={action}"));
        }
        if let Some(detail) = e.detail.as_deref() {
            line.push_str(&format!(" detail={detail:?}"));
        }
        println!("{line}");
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
