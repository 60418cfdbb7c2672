//! # Supervisor-owned mutable state.
//!
//! All of it lives here, owned exclusively by the supervisor cycle — there
//! are no module-level globals and no cross-context sharing, so none of it
//! needs synchronization.

/// Process-lifetime counters owned by the supervisor cycle.
#[derive(Debug, Clone)]
pub struct SupervisorState {
    /// Monotonic count of processed error/timeout events.
    pub(crate) error_total: u64,
    /// Snapshot of `error_total` taken at the start of the current cycle.
    pub(crate) previous_error_total: u64,
    /// Cleared by a TerminateAll action; tells the owner to stop ticking.
    pub(crate) keep_running: bool,
}

impl SupervisorState {
    pub(crate) fn new() -> Self {
        Self {
            error_total: 0,
            previous_error_total: 0,
            keep_running: true,
        }
    }

    /// Monotonic count of processed error/timeout events.
    pub fn error_total(&self) -> u64 {
        self.error_total
    }

    /// False once a TerminateAll action has run.
    pub fn keep_running(&self) -> bool {
        self.keep_running
    }
}
