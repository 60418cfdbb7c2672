//! # Missed-heartbeat tracking.
//!
//! Per-worker consecutive-miss counters with the timeout-synthesis rule.
//!
//! ## Cycle protocol
//! ```text
//! begin_cycle()        every worker marked "not yet seen"
//! observe(w) × N       heartbeat seen: clear the mark, reset the count to 0
//! end_cycle()          still-unseen workers: count += 1 (saturating at the
//!                      limit); returns the workers whose count REACHED the
//!                      limit this cycle
//! ```
//!
//! ## Rules
//! - A count never exceeds the limit.
//! - The limit transition fires **exactly once** per outage: a worker that
//!   stays silent keeps its saturated count but is not returned again until
//!   it heartbeats (resetting the count) and goes silent again.

use crate::workers::WorkerId;

/// Consecutive-miss counters for the fixed worker population.
pub(crate) struct MissTracker {
    counts: [u8; WorkerId::COUNT],
    seen: [bool; WorkerId::COUNT],
    limit: u8,
}

impl MissTracker {
    pub(crate) fn new(limit: u8) -> Self {
        Self {
            counts: [0; WorkerId::COUNT],
            seen: [false; WorkerId::COUNT],
            limit,
        }
    }

    /// Marks every worker "not yet seen" for the cycle about to drain.
    pub(crate) fn begin_cycle(&mut self) {
        self.seen = [false; WorkerId::COUNT];
    }

    /// Notes a heartbeat from `worker`: the miss count resets the instant
    /// any heartbeat is observed in a cycle.
    pub(crate) fn observe(&mut self, worker: WorkerId) {
        self.seen[worker.index()] = true;
        self.counts[worker.index()] = 0;
    }

    /// End-of-cycle pass: increments still-unseen counters (saturating) and
    /// returns the workers that newly reached the limit.
    pub(crate) fn end_cycle(&mut self) -> Vec<WorkerId> {
        let mut timed_out = Vec::new();
        for worker in WorkerId::ALL {
            let i = worker.index();
            if self.seen[i] || self.counts[i] >= self.limit {
                continue;
            }
            self.counts[i] += 1;
            if self.counts[i] == self.limit {
                timed_out.push(worker);
            }
        }
        timed_out
    }

    /// Current consecutive-miss count for `worker`.
    pub(crate) fn count(&self, worker: WorkerId) -> u8 {
        self.counts[worker.index()]
    }
}
