//! # Worker identities and categories.
//!
//! The supervised population is **closed**: every worker the controller will
//! ever run is named here, assigned at startup, and immutable for the life of
//! the process. There is no dynamic discovery; the supervisor sizes its
//! per-worker state (miss counters, cancellation tokens) directly from
//! [`WorkerId::COUNT`].
//!
//! ## Rules
//! - [`WorkerId::index`] is dense (`0..COUNT`) and stable, suitable for array
//!   indexing.
//! - [`WorkerCategory`] classifies each id for the action table. All categories
//!   share one table today; the category is kept as a first-class dimension so
//!   one can diverge later without touching callers.

use std::fmt;

/// Identity of one supervised unit.
///
/// Fixed, known set for the lifetime of the program: two sensor readers, the
/// remote-communication handler, and the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerId {
    /// Soil-moisture sensor reader.
    MoistureSensor,
    /// Ambient-light sensor reader.
    LightSensor,
    /// Remote command/telemetry handler.
    RemoteComm,
    /// Log-record writer.
    Logger,
}

impl WorkerId {
    /// Number of supervised workers.
    pub const COUNT: usize = 4;

    /// Every known worker, in index order.
    pub const ALL: [WorkerId; WorkerId::COUNT] = [
        WorkerId::MoistureSensor,
        WorkerId::LightSensor,
        WorkerId::RemoteComm,
        WorkerId::Logger,
    ];

    /// Dense index in `0..COUNT`, stable for the program lifetime.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            WorkerId::MoistureSensor => 0,
            WorkerId::LightSensor => 1,
            WorkerId::RemoteComm => 2,
            WorkerId::Logger => 3,
        }
    }

    /// Category used by the action table.
    #[inline]
    pub fn category(self) -> WorkerCategory {
        match self {
            WorkerId::MoistureSensor | WorkerId::LightSensor => WorkerCategory::Sensor,
            WorkerId::RemoteComm => WorkerCategory::RemoteComm,
            WorkerId::Logger => WorkerCategory::Logging,
        }
    }

    /// Stable, log-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            WorkerId::MoistureSensor => "moisture-sensor",
            WorkerId::LightSensor => "light-sensor",
            WorkerId::RemoteComm => "remote-comm",
            WorkerId::Logger => "logger",
        }
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of a [`WorkerId`] for the action table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerCategory {
    /// Periodic sensor readers.
    Sensor,
    /// Remote command/telemetry handlers.
    RemoteComm,
    /// The logging worker.
    Logging,
}

impl fmt::Display for WorkerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkerCategory::Sensor => "sensor",
            WorkerCategory::RemoteComm => "remote-comm",
            WorkerCategory::Logging => "logging",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense_and_match_all_order() {
        for (i, id) in WorkerId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(WorkerId::MoistureSensor.category(), WorkerCategory::Sensor);
        assert_eq!(WorkerId::LightSensor.category(), WorkerCategory::Sensor);
        assert_eq!(WorkerId::RemoteComm.category(), WorkerCategory::RemoteComm);
        assert_eq!(WorkerId::Logger.category(), WorkerCategory::Logging);
    }
}
