//! # Global runtime configuration.
//!
//! [`Config`] centralizes the supervision timing knobs: worker and supervisor
//! loop periods, the consecutive-miss limit, the receive poll timeout, and the
//! heartbeat channel capacity.
//!
//! ## Derived values
//! - `channel_capacity = 0` → derive from the worker count (two heartbeats per
//!   worker per supervisory window, doubled for slack)
//! - the per-cycle drain limit is always `workers × 20 + 1`
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use plantvisor::Config;
//!
//! let mut cfg = Config::default();
//! cfg.cycle_period = Duration::from_secs(2);
//! assert!(cfg.validate().is_ok());
//! assert_eq!(cfg.drain_limit(4), 81);
//! ```

use std::time::Duration;

use crate::error::ConfigError;

/// Supervision timing and capacity settings.
///
/// ## Field semantics
/// - `worker_period`: nominal worker loop period (each worker heartbeats once
///   per period)
/// - `cycle_period`: supervisor loop period; nominally twice `worker_period`,
///   so a healthy cycle sees about two heartbeats per worker
/// - `miss_limit`: consecutive empty cycles before a worker is declared timed
///   out (saturating counter cap)
/// - `poll_timeout`: upper bound on one channel receive, keeping the cycle
///   bounded even when idle
/// - `channel_capacity`: heartbeat queue size; `0` derives a default from the
///   worker count
#[derive(Clone, Debug)]
pub struct Config {
    /// Nominal worker loop period.
    pub worker_period: Duration,
    /// Supervisor loop period (nominally `2 × worker_period`).
    pub cycle_period: Duration,
    /// Consecutive missed cycles before a timeout is synthesized.
    pub miss_limit: u8,
    /// Upper bound on a single channel receive.
    pub poll_timeout: Duration,
    /// Heartbeat channel capacity (`0` = derive from worker count).
    pub channel_capacity: usize,
}

impl Config {
    /// Rejects configurations that would wedge the runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.miss_limit == 0 {
            return Err(ConfigError::MissLimitZero);
        }
        if self.worker_period.is_zero() {
            return Err(ConfigError::PeriodZero { which: "worker" });
        }
        if self.cycle_period.is_zero() {
            return Err(ConfigError::PeriodZero { which: "cycle" });
        }
        if self.poll_timeout.is_zero() {
            return Err(ConfigError::PollTimeoutZero);
        }
        Ok(())
    }

    /// Maximum messages drained in one cycle. Protects the supervisor from
    /// falling permanently behind a noisy worker population.
    #[inline]
    pub fn drain_limit(&self, workers: usize) -> usize {
        workers * 20 + 1
    }

    /// Effective channel capacity for the given worker count.
    ///
    /// A healthy window carries about two heartbeats per worker; the default
    /// doubles that for slack.
    #[inline]
    pub fn capacity_for(&self, workers: usize) -> usize {
        if self.channel_capacity > 0 {
            self.channel_capacity
        } else {
            (workers * 4).max(1)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    /// - `worker_period = 500ms`
    /// - `cycle_period = 1s` (half the worker frequency)
    /// - `miss_limit = 3`
    /// - `poll_timeout = 10ms`
    /// - `channel_capacity = 0` (derived)
    fn default() -> Self {
        Self {
            worker_period: Duration::from_millis(500),
            cycle_period: Duration::from_secs(1),
            miss_limit: 3,
            poll_timeout: Duration::from_millis(10),
            channel_capacity: 0,
        }
    }
}
