//! Error types used by the plantvisor runtime and workers.
//!
//! Two error enums:
//!
//! - [`ConfigError`] — invalid configuration, rejected before any supervisory
//!   state exists.
//! - [`HeartbeatSendError`] — a heartbeat could not be enqueued.
//!
//! Both provide `as_label()` for short, stable log/metric tags.

use thiserror::Error;

use crate::heartbeat::HeartbeatMessage;

/// # Invalid configuration.
///
/// Raised by [`Config::validate`](crate::Config::validate) (and therefore by
/// [`Supervisor::new`](crate::Supervisor::new)) before any state is created,
/// so a bad argument never mutates anything.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The miss limit must be at least 1.
    #[error("miss_limit must be >= 1")]
    MissLimitZero,

    /// A loop period must be non-zero.
    #[error("{which} period must be > 0")]
    PeriodZero {
        /// Which period was zero (`"worker"` or `"cycle"`).
        which: &'static str,
    },

    /// The receive poll timeout must be non-zero.
    #[error("poll_timeout must be > 0")]
    PollTimeoutZero,
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::MissLimitZero => "config_miss_limit_zero",
            ConfigError::PeriodZero { .. } => "config_period_zero",
            ConfigError::PollTimeoutZero => "config_poll_timeout_zero",
        }
    }
}

/// # A heartbeat could not be enqueued.
///
/// Sends are non-blocking by policy: a worker must never stall on supervision
/// plumbing, so a full channel rejects the message instead of blocking. The
/// rejected message is returned to the caller in both variants.
#[derive(Error, Debug)]
pub enum HeartbeatSendError {
    /// The channel is at capacity.
    #[error("heartbeat channel full")]
    Full(HeartbeatMessage),

    /// The supervisor side has been dropped.
    #[error("heartbeat channel closed")]
    Closed(HeartbeatMessage),
}

impl HeartbeatSendError {
    /// Returns a short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            HeartbeatSendError::Full(_) => "heartbeat_channel_full",
            HeartbeatSendError::Closed(_) => "heartbeat_channel_closed",
        }
    }

    /// Recovers the message that could not be sent.
    pub fn into_message(self) -> HeartbeatMessage {
        match self {
            HeartbeatSendError::Full(msg) | HeartbeatSendError::Closed(msg) => msg,
        }
    }
}
