//! Runtime core: classification, tracking, and the supervisory cycle.
//!
//! The public API from this module is the [`Supervisor`] (with its
//! [`CycleOutcome`] and [`SupervisorState`]) plus the pure
//! [`classify`] function and its [`CourseOfAction`] result.
//!
//! Internal modules:
//! - [`classify`]: maps (category, error code) to exactly one action;
//! - [`misses`]: per-worker consecutive-miss counters and timeout synthesis;
//! - [`cancel`]: per-worker cancellation tokens under one root;
//! - [`executor`]: applies a course of action to state and cancellation;
//! - [`supervisor`]: the bounded drain/classify/track/act cycle.

mod cancel;
mod classify;
mod executor;
mod misses;
mod state;
mod supervisor;

pub use classify::{classify, CourseOfAction};
pub use state::SupervisorState;
pub use supervisor::{CycleOutcome, Supervisor};
