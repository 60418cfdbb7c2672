//! # Action execution.
//!
//! Turns a [`CourseOfAction`] into its concrete effect on supervisor state
//! and the cancellation registry. Every non-trivial execution records an
//! event carrying the worker, category, and numeric code, so escalations are
//! visible without inspecting internal counters.
//!
//! ## Effects
//! ```text
//! None            nothing
//! NotifyOnly      error_total += 1
//! RestartWorker   error_total += 1            (restart itself is a placeholder)
//! TerminateWorker error_total += 1, cancel that worker
//! TerminateAll    error_total += 1, keep_running = false,
//!                 cancel every worker exactly once
//! ```

use crate::core::cancel::CancelRegistry;
use crate::core::classify::CourseOfAction;
use crate::core::state::SupervisorState;
use crate::events::{EventId, SinkSet, SupervisorEvent};
use crate::heartbeat::ErrorCode;
use crate::workers::WorkerId;

/// Applies courses of action. Owns the cancellation registry; the counters
/// live in [`SupervisorState`] and are passed in by the cycle.
pub(crate) struct ActionExecutor {
    cancels: CancelRegistry,
}

impl ActionExecutor {
    pub(crate) fn new() -> Self {
        Self {
            cancels: CancelRegistry::new(),
        }
    }

    pub(crate) fn token_for(&self, worker: WorkerId) -> tokio_util::sync::CancellationToken {
        self.cancels.token_for(worker)
    }

    pub(crate) fn root_token(&self) -> tokio_util::sync::CancellationToken {
        self.cancels.root()
    }

    /// Executes one course of action for `worker`'s report of `code`.
    pub(crate) fn execute(
        &self,
        action: CourseOfAction,
        worker: WorkerId,
        code: ErrorCode,
        state: &mut SupervisorState,
        sinks: &SinkSet,
    ) {
        if action == CourseOfAction::None {
            return;
        }

        state.error_total += 1;
        sinks.emit(
            &SupervisorEvent::new(EventId::ActionTaken)
                .with_worker(worker)
                .with_code(code)
                .with_action(action),
        );

        match action {
            CourseOfAction::None | CourseOfAction::NotifyOnly => {}
            CourseOfAction::RestartWorker => {
                // Counted and surfaced only: what "restart" means for a
                // worker's in-progress state is undefined upstream.
            }
            CourseOfAction::TerminateWorker => {
                self.cancels.request(worker);
                sinks.emit(&SupervisorEvent::new(EventId::CancelRequested).with_worker(worker));
            }
            CourseOfAction::TerminateAll => {
                state.keep_running = false;
                self.cancels.request_all();
                sinks.emit(&SupervisorEvent::new(EventId::CancelAllRequested).with_worker(worker));
            }
        }
    }
}
