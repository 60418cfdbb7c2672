//! Worker identities, bodies, and the loop skeleton.
//!
//! ## Contents
//! - [`WorkerId`], [`WorkerCategory`] — the closed set of supervised units
//! - [`Worker`], [`WorkerFn`], [`Report`] — the per-iteration body contract
//! - [`WorkerRuntime`] — periodic wake + cooperative cancellation + heartbeat

mod id;
mod runtime;
mod worker;

pub use id::{WorkerCategory, WorkerId};
pub use runtime::WorkerRuntime;
pub use worker::{Report, Worker, WorkerFn};
