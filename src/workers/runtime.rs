//! # WorkerRuntime: the per-worker loop skeleton.
//!
//! Every supervised unit runs the same skeleton; only the body differs:
//!
//! ```text
//! loop {
//!   ├─► cancellation check (single check, top of iteration)
//!   │     └─ cancelled → send final Terminated report, exit
//!   ├─► worker.poll()            (the body: sensor read, socket I/O, ...)
//!   ├─► send one heartbeat       (fail-fast; a drop is diagnostic only)
//!   └─► wait for the periodic wake (cancellable — a stop request only
//!         shortens the sleep, never preempts the body)
//! }
//! ```
//!
//! ## Rules
//! - Exactly **one** heartbeat per iteration: the first immediately on
//!   start, then one per loop period.
//! - Cancellation is **cooperative**: the flag is observed once at the top of
//!   the next iteration, so worst-case cancellation latency is one full loop
//!   period.
//! - A full heartbeat channel never blocks or kills the worker; the dropped
//!   report is noted on stderr and the loop continues.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::heartbeat::{HeartbeatMessage, HeartbeatSender};
use crate::workers::worker::Worker;

/// Loop skeleton wrapping one [`Worker`] body.
pub struct WorkerRuntime<W> {
    worker: W,
    tx: HeartbeatSender,
    token: CancellationToken,
    period: Duration,
}

impl<W: Worker> WorkerRuntime<W> {
    /// Creates a runtime for `worker`.
    ///
    /// `token` must be the cancellation token the supervisor holds for this
    /// worker's id (see [`Supervisor::cancel_token`](crate::Supervisor::cancel_token));
    /// `period` is the worker loop period from [`Config`](crate::Config).
    pub fn new(
        worker: W,
        tx: HeartbeatSender,
        token: CancellationToken,
        period: Duration,
    ) -> Self {
        Self {
            worker,
            tx,
            token,
            period,
        }
    }

    /// Runs the loop until cancellation is observed.
    ///
    /// On exit the runtime sends a final report (`Terminated` / `Killed`) so
    /// the supervisor sees a clean unwind rather than a silent miss.
    pub async fn run(mut self) {
        let id = self.worker.id();
        // First wake is one full period out; the immediate first iteration
        // below already covers t = 0, so ticks must not.
        let mut clock = time::interval_at(time::Instant::now() + self.period, self.period);
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if self.token.is_cancelled() {
                if let Err(e) = self.tx.send(HeartbeatMessage::exiting(id)) {
                    eprintln!("[plantvisor] {id}: exit report dropped: {}", e.as_label());
                }
                break;
            }

            let report = self.worker.poll().await;
            if let Err(e) = self.tx.report(id, report.status, report.code) {
                eprintln!("[plantvisor] {id}: heartbeat dropped: {}", e.as_label());
            }

            tokio::select! {
                _ = clock.tick() => {}
                _ = self.token.cancelled() => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heartbeat::{heartbeat_channel, ErrorCode, ReportedStatus, WorkerState};
    use crate::workers::worker::{Report, WorkerFn};
    use crate::workers::WorkerId;

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_one_heartbeat_per_iteration_then_terminal_report() {
        let (tx, mut rx) = heartbeat_channel(16);
        let token = CancellationToken::new();
        let worker = WorkerFn::new(WorkerId::MoistureSensor, || async { Report::ok() });
        let runtime = WorkerRuntime::new(
            worker,
            tx,
            token.clone(),
            Duration::from_millis(500),
        );
        let handle = tokio::spawn(runtime.run());

        // Let a few iterations elapse, then request cancellation.
        time::sleep(Duration::from_millis(1600)).await;
        token.cancel();
        handle.await.unwrap();

        let mut reports = Vec::new();
        while let Some(msg) = rx.try_recv_one() {
            reports.push(msg);
        }
        // One report per completed iteration plus the terminal one.
        assert!(reports.len() >= 2);
        let last = reports.pop().unwrap();
        assert_eq!(last.status, ReportedStatus::Terminated);
        assert_eq!(last.state, WorkerState::Killed);
        for msg in &reports {
            assert_eq!(msg.worker, WorkerId::MoistureSensor);
            assert_eq!(msg.status, ReportedStatus::Ok);
            assert_eq!(msg.code, ErrorCode::USER_NONE_FIRST);
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_startup_paces_one_heartbeat_per_period() {
        let (tx, mut rx) = heartbeat_channel(16);
        let token = CancellationToken::new();
        let worker = WorkerFn::new(WorkerId::LightSensor, || async { Report::ok() });
        let runtime = WorkerRuntime::new(
            worker,
            tx,
            token.clone(),
            Duration::from_millis(500),
        );
        let handle = tokio::spawn(runtime.run());

        // Within the first period only the immediate startup heartbeat
        // exists; the second arrives one full period later, not back-to-back.
        time::sleep(Duration::from_millis(450)).await;
        let mut seen = 0;
        while rx.try_recv_one().is_some() {
            seen += 1;
        }
        assert_eq!(seen, 1);

        time::sleep(Duration::from_millis(500)).await;
        let mut seen = 0;
        while rx.try_recv_one().is_some() {
            seen += 1;
        }
        assert_eq!(seen, 1);

        token.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_cancellation_observed_at_top_of_next_iteration() {
        let (tx, mut rx) = heartbeat_channel(16);
        let token = CancellationToken::new();
        // Cancel before the loop ever runs: the first top-of-loop check wins,
        // so only the terminal report is emitted.
        token.cancel();
        let worker = WorkerFn::new(WorkerId::Logger, || async { Report::ok() });
        WorkerRuntime::new(worker, tx, token, Duration::from_millis(500))
            .run()
            .await;

        let only = rx.try_recv_one().unwrap();
        assert_eq!(only.status, ReportedStatus::Terminated);
        assert!(rx.try_recv_one().is_none());
    }
}
