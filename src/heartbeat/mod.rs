//! Heartbeat data model and transport.
//!
//! ## Contents
//! - [`HeartbeatMessage`], [`ReportedStatus`], [`WorkerState`] — the report a
//!   worker emits once per loop iteration
//! - [`ErrorCode`] — the banded status byte driving classification
//! - [`heartbeat_channel`] — bounded MPSC transport with depth watermarking

mod channel;
mod codes;
mod message;

pub use channel::{heartbeat_channel, HeartbeatReceiver, HeartbeatSender, RecvOutcome};
pub use codes::ErrorCode;
pub use message::{HeartbeatMessage, ReportedStatus, WorkerState};
