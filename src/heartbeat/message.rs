//! # Heartbeat reports sent from workers to the supervisor.
//!
//! A [`HeartbeatMessage`] is a value type: a worker creates one immediately
//! before send, the supervisor consumes it exactly once, and it is never
//! mutated afterward.
//!
//! ## Fields
//! - `origin`: opaque diagnostic tag (globally monotonic sequence number);
//!   never interpreted by the supervisor.
//! - `at`: wall-clock timestamp taken at creation.
//! - `worker`: the reporting [`WorkerId`].
//! - `state`: descriptive lifecycle state ([`WorkerState`]).
//! - `status`: the worker's self-assessment ([`ReportedStatus`]).
//! - `code`: the [`ErrorCode`] driving classification.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::heartbeat::codes::ErrorCode;
use crate::workers::WorkerId;

/// Global sequence counter tagging each message for diagnostics.
static HEARTBEAT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Descriptive lifecycle state carried in a heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Not yet running its loop.
    Idle,
    /// Running normally.
    Running,
    /// Exiting after a cancellation request.
    Killed,
}

/// A worker's self-reported status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportedStatus {
    /// Iteration completed normally.
    Ok,
    /// Iteration hit an error; `code` says which.
    Error,
    /// The worker is unwinding and will not report again.
    Terminated,
}

/// One status report from a worker to the supervisor.
#[derive(Debug, Clone)]
pub struct HeartbeatMessage {
    /// Opaque diagnostic tag; monotonic across all producers.
    pub origin: u64,
    /// Wall-clock timestamp at creation.
    pub at: SystemTime,
    /// The reporting worker.
    pub worker: WorkerId,
    /// Descriptive lifecycle state.
    pub state: WorkerState,
    /// Self-reported status.
    pub status: ReportedStatus,
    /// Error code driving classification.
    pub code: ErrorCode,
}

impl HeartbeatMessage {
    /// Creates an ordinary report (state `Running`).
    pub fn new(worker: WorkerId, status: ReportedStatus, code: ErrorCode) -> Self {
        Self {
            origin: HEARTBEAT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            worker,
            state: WorkerState::Running,
            status,
            code,
        }
    }

    /// Creates the final report a worker sends while unwinding after a
    /// cancellation request.
    pub fn exiting(worker: WorkerId) -> Self {
        let mut msg = Self::new(worker, ReportedStatus::Terminated, ErrorCode::USER_NONE_FIRST);
        msg.state = WorkerState::Killed;
        msg
    }

    /// Fabricates the timeout report the supervisor feeds through the normal
    /// classification path when a worker has missed too many cycles.
    pub(crate) fn timeout(worker: WorkerId) -> Self {
        Self::new(worker, ReportedStatus::Error, ErrorCode::TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_monotonic() {
        let a = HeartbeatMessage::new(WorkerId::Logger, ReportedStatus::Ok, ErrorCode::NONE);
        let b = HeartbeatMessage::new(WorkerId::Logger, ReportedStatus::Ok, ErrorCode::NONE);
        assert!(b.origin > a.origin);
    }

    #[test]
    fn test_timeout_report_shape() {
        let msg = HeartbeatMessage::timeout(WorkerId::RemoteComm);
        assert_eq!(msg.worker, WorkerId::RemoteComm);
        assert_eq!(msg.status, ReportedStatus::Error);
        assert_eq!(msg.code, ErrorCode::TIMEOUT);
    }

    #[test]
    fn test_exit_report_shape() {
        let msg = HeartbeatMessage::exiting(WorkerId::LightSensor);
        assert_eq!(msg.state, WorkerState::Killed);
        assert_eq!(msg.status, ReportedStatus::Terminated);
    }
}
