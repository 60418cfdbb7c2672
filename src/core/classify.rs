//! # Error-code classification.
//!
//! Maps a (worker category, error code) pair to exactly one
//! [`CourseOfAction`]. Pure and total: every byte value resolves, and
//! anything outside the defined bands resolves **fail-closed** to
//! [`CourseOfAction::TerminateAll`].
//!
//! One table serves all three categories today. The category parameter is
//! deliberate: it lets one category diverge later without touching any
//! caller.
//!
//! ## Table
//! ```text
//! 128..=135            → None
//! 136..=143, TIMEOUT   → NotifyOnly
//! 144..=151            → TerminateWorker
//! 152..=159            → TerminateAll
//! 160..=167            → RestartWorker
//! anything else        → TerminateAll   (fail-closed)
//! ```
//!
//! ## Example
//! ```
//! use plantvisor::{classify, CourseOfAction, ErrorCode, WorkerCategory};
//!
//! let action = classify(WorkerCategory::Sensor, ErrorCode::TIMEOUT);
//! assert_eq!(action, CourseOfAction::NotifyOnly);
//! ```

use std::fmt;

use crate::heartbeat::ErrorCode;
use crate::workers::WorkerCategory;

/// The supervisor's decision for one classified report or synthesized
/// timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseOfAction {
    /// No effect.
    None,
    /// Count and surface for logging; no cancellation.
    NotifyOnly,
    /// Count; restart semantics are a placeholder (undefined upstream).
    RestartWorker,
    /// Count and cancel exactly the reporting worker.
    TerminateWorker,
    /// Count, stop the supervisor, and cancel every known worker.
    TerminateAll,
}

impl fmt::Display for CourseOfAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CourseOfAction::None => "none",
            CourseOfAction::NotifyOnly => "notify-only",
            CourseOfAction::RestartWorker => "restart-worker",
            CourseOfAction::TerminateWorker => "terminate-worker",
            CourseOfAction::TerminateAll => "terminate-all",
        };
        f.write_str(s)
    }
}

/// Classifies one report. Pure, total, no side effects.
pub fn classify(category: WorkerCategory, code: ErrorCode) -> CourseOfAction {
    // Single shared table; the parameter is kept so a category can diverge
    // without touching callers.
    let _ = category;

    if code == ErrorCode::TIMEOUT {
        return CourseOfAction::NotifyOnly;
    }
    match code.get() {
        128..=135 => CourseOfAction::None,
        136..=143 => CourseOfAction::NotifyOnly,
        144..=151 => CourseOfAction::TerminateWorker,
        152..=159 => CourseOfAction::TerminateAll,
        160..=167 => CourseOfAction::RestartWorker,
        _ => CourseOfAction::TerminateAll,
    }
}
