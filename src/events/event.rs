//! # Supervision events.
//!
//! The supervisor records an event on every state transition it drives:
//! a worker's first heartbeat, a declared timeout, an executed action, a
//! cancellation request, a drain overrun, channel watermarks, transport
//! errors. Events are keyed by a small [`EventId`] enumeration so sinks can
//! dispatch without parsing text; how (or whether) they are persisted is a
//! sink concern.
//!
//! ## Example
//! ```
//! use plantvisor::{EventId, Severity, SupervisorEvent, WorkerId};
//!
//! let ev = SupervisorEvent::new(EventId::WorkerMissing).with_worker(WorkerId::Logger);
//! assert_eq!(ev.severity, Severity::Warning);
//! assert_eq!(ev.worker, Some(WorkerId::Logger));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::core::CourseOfAction;
use crate::heartbeat::ErrorCode;
use crate::workers::WorkerId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Severity of a recorded event. Ordered: `Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Classification of supervision events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventId {
    /// First heartbeat observed from a worker.
    WorkerStarted,
    /// A worker hit the consecutive-miss limit; a timeout was synthesized.
    WorkerMissing,
    /// A classified report resolved to a non-trivial course of action.
    ///
    /// Sets `worker`, `code`, `action`.
    ActionTaken,
    /// A cancellation request was delivered to one worker.
    CancelRequested,
    /// Cancellation was requested for every known worker.
    CancelAllRequested,
    /// The per-cycle drain limit was hit; remaining messages wait for the
    /// next cycle.
    CycleOverrun,
    /// Heartbeat channel at or above the 75% watermark.
    QueueHighWater,
    /// Heartbeat channel completely full.
    QueueFull,
    /// A channel receive failed for a reason other than "empty".
    ReceiveError,
    /// An external stop request aborted the cycle mid-drain.
    StopRequested,
}

impl EventId {
    /// Default severity for this event id.
    pub fn severity(self) -> Severity {
        match self {
            EventId::WorkerStarted | EventId::StopRequested => Severity::Info,
            EventId::WorkerMissing
            | EventId::ActionTaken
            | EventId::CancelRequested
            | EventId::CycleOverrun
            | EventId::QueueHighWater => Severity::Warning,
            EventId::CancelAllRequested | EventId::QueueFull | EventId::ReceiveError => {
                Severity::Error
            }
        }
    }

    /// Stable, log-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            EventId::WorkerStarted => "worker-started",
            EventId::WorkerMissing => "worker-missing",
            EventId::ActionTaken => "action-taken",
            EventId::CancelRequested => "cancel-requested",
            EventId::CancelAllRequested => "cancel-all-requested",
            EventId::CycleOverrun => "cycle-overrun",
            EventId::QueueHighWater => "queue-high-water",
            EventId::QueueFull => "queue-full",
            EventId::ReceiveError => "receive-error",
            EventId::StopRequested => "stop-requested",
        }
    }
}

/// One recorded supervision event with optional metadata.
#[derive(Debug, Clone)]
pub struct SupervisorEvent {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub id: EventId,
    /// Severity (defaults per [`EventId::severity`]).
    pub severity: Severity,
    /// Worker concerned, if any.
    pub worker: Option<WorkerId>,
    /// Error code concerned, if any.
    pub code: Option<ErrorCode>,
    /// Course of action taken, if any.
    pub action: Option<CourseOfAction>,
    /// Free-form detail.
    pub detail: Option<Arc<str>>,
}

impl SupervisorEvent {
    /// Creates a new event with the current timestamp, the next sequence
    /// number, and the id's default severity.
    pub fn new(id: EventId) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            id,
            severity: id.severity(),
            worker: None,
            code: None,
            action: None,
            detail: None,
        }
    }

    /// Attaches the worker concerned.
    #[inline]
    pub fn with_worker(mut self, worker: WorkerId) -> Self {
        self.worker = Some(worker);
        self
    }

    /// Attaches the error code concerned.
    #[inline]
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attaches the course of action taken.
    #[inline]
    pub fn with_action(mut self, action: CourseOfAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Attaches free-form detail.
    #[inline]
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Overrides the default severity.
    #[inline]
    pub fn at_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}
