//! # Supervisor: the bounded drain, classify, track, act cycle.
//!
//! The [`Supervisor`] owns the heartbeat receiver, the miss tracker, the
//! action executor with its cancellation registry, and all mutable
//! supervisory state. Whatever owns the top-level program loop calls
//! [`Supervisor::run_cycle`] once per supervisory tick.
//!
//! ## One cycle
//! ```text
//! run_cycle(stop):
//!   ├─► snapshot error_total                   (for new_error detection)
//!   ├─► watermark channel depth                (warn ≥ 75%, error at 100%)
//!   ├─► Draining: pull messages until
//!   │     ├─ channel empty (bounded poll)       → reconcile
//!   │     ├─ channel closed                     → count receive error, reconcile
//!   │     ├─ drain limit (workers × 20 + 1)     → log overrun, reconcile
//!   │     └─ stop requested                     → return immediately
//!   │   each message: mark seen, classify, execute exactly one action
//!   └─► Reconciling: end-of-cycle miss pass; every worker that newly hit
//!         the miss limit gets a synthesized TIMEOUT report fed through the
//!         same classify/execute path as real heartbeats
//! ```
//!
//! ## Rules
//! - At most `drain_limit` messages are consumed per call; leftovers wait
//!   for the next cycle, so a noisy population cannot pin the supervisor.
//! - Exactly one [`CourseOfAction`](crate::CourseOfAction) per processed
//!   message or synthesized timeout.
//! - Transport problems are counted locally and surfaced as events; they
//!   never feed the classifier and never cause a cancellation.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use plantvisor::{
//!     Config, EventSink, Report, Supervisor, WorkerFn, WorkerId, WorkerRuntime,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let cfg = Config::default();
//!     let sinks: Vec<Arc<dyn EventSink>> = Vec::new();
//!     let (mut sup, tx) = Supervisor::new(cfg.clone(), sinks).unwrap();
//!
//!     for id in WorkerId::ALL {
//!         let runtime = WorkerRuntime::new(
//!             WorkerFn::new(id, || async { Report::ok() }),
//!             tx.clone(),
//!             sup.cancel_token(id),
//!             cfg.worker_period,
//!         );
//!         tokio::spawn(runtime.run());
//!     }
//!
//!     let stop = CancellationToken::new();
//!     let mut tick = tokio::time::interval(cfg.cycle_period);
//!     loop {
//!         tick.tick().await;
//!         let outcome = sup.run_cycle(&stop).await;
//!         // outcome.new_error drives an external status indicator.
//!         if !outcome.continue_running || stop.is_cancelled() {
//!             break;
//!         }
//!     }
//! }
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::classify::classify;
use crate::core::executor::ActionExecutor;
use crate::core::misses::MissTracker;
use crate::core::state::SupervisorState;
use crate::error::ConfigError;
use crate::events::{EventId, EventSink, SinkSet, SupervisorEvent};
use crate::heartbeat::{
    heartbeat_channel, HeartbeatMessage, HeartbeatReceiver, HeartbeatSender, RecvOutcome,
};
use crate::workers::WorkerId;

/// Result of one supervisory cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleOutcome {
    /// False once a TerminateAll action has run; the owner should stop
    /// ticking.
    pub continue_running: bool,
    /// True if `error_total` moved this cycle. Drives an external status
    /// indicator without it having to inspect counters or logs.
    pub new_error: bool,
}

/// Coordinates heartbeat draining, miss tracking, classification, and action
/// execution for the fixed worker population.
pub struct Supervisor {
    cfg: Config,
    rx: HeartbeatReceiver,
    executor: ActionExecutor,
    misses: MissTracker,
    state: SupervisorState,
    sinks: SinkSet,
    started: [bool; WorkerId::COUNT],
    recv_errors: u64,
}

impl Supervisor {
    /// Creates a supervisor and the producer handle workers send through.
    ///
    /// `cfg` is validated before any state is built; a bad configuration
    /// leaves nothing behind.
    pub fn new(
        cfg: Config,
        sinks: Vec<Arc<dyn EventSink>>,
    ) -> Result<(Self, HeartbeatSender), ConfigError> {
        cfg.validate()?;
        let capacity = cfg.capacity_for(WorkerId::COUNT);
        let (tx, rx) = heartbeat_channel(capacity);
        let sup = Self {
            misses: MissTracker::new(cfg.miss_limit),
            cfg,
            rx,
            executor: ActionExecutor::new(),
            state: SupervisorState::new(),
            sinks: SinkSet::new(sinks),
            started: [false; WorkerId::COUNT],
            recv_errors: 0,
        };
        Ok((sup, tx))
    }

    /// The cancellation token `worker`'s runtime must observe.
    pub fn cancel_token(&self, worker: WorkerId) -> CancellationToken {
        self.executor.token_for(worker)
    }

    /// Root cancellation token; cancelling it reaches every worker. For
    /// embedders that want one external kill switch.
    pub fn kill_switch(&self) -> CancellationToken {
        self.executor.root_token()
    }

    /// Read access to the supervisory counters.
    pub fn state(&self) -> &SupervisorState {
        &self.state
    }

    /// Consecutive cycles `worker` has gone unheard. Saturates at the miss
    /// limit.
    pub fn missing_count(&self, worker: WorkerId) -> u8 {
        self.misses.count(worker)
    }

    /// Transport-level receive failures seen so far.
    pub fn receive_errors(&self) -> u64 {
        self.recv_errors
    }

    /// Messages currently queued in the heartbeat channel (advisory).
    pub fn channel_depth(&self) -> usize {
        self.rx.depth()
    }

    /// Runs one supervisory cycle. See the module docs for the state
    /// machine; a cancelled `stop` aborts mid-drain without reconciling.
    pub async fn run_cycle(&mut self, stop: &CancellationToken) -> CycleOutcome {
        self.state.previous_error_total = self.state.error_total;
        self.watermark_depth();
        self.misses.begin_cycle();

        let limit = self.cfg.drain_limit(WorkerId::COUNT);
        let mut drained = 0usize;
        let mut aborted = false;

        loop {
            if stop.is_cancelled() {
                self.sinks.emit(&SupervisorEvent::new(EventId::StopRequested));
                aborted = true;
                break;
            }
            if drained == limit {
                self.sinks.emit(
                    &SupervisorEvent::new(EventId::CycleOverrun)
                        .with_detail(format!("drained {drained} messages")),
                );
                break;
            }
            match self.rx.recv_within(self.cfg.poll_timeout).await {
                RecvOutcome::Empty => break,
                RecvOutcome::Closed => {
                    self.recv_errors += 1;
                    self.sinks.emit(
                        &SupervisorEvent::new(EventId::ReceiveError)
                            .with_detail("heartbeat channel closed"),
                    );
                    break;
                }
                RecvOutcome::Message(msg) => {
                    drained += 1;
                    self.process(&msg);
                }
            }
        }

        if !aborted {
            self.reconcile();
        }

        CycleOutcome {
            continue_running: self.state.keep_running,
            new_error: self.state.error_total != self.state.previous_error_total,
        }
    }

    /// Classifies one received report and executes exactly one action.
    fn process(&mut self, msg: &HeartbeatMessage) {
        self.note_started(msg.worker);
        self.misses.observe(msg.worker);
        let action = classify(msg.worker.category(), msg.code);
        self.executor
            .execute(action, msg.worker, msg.code, &mut self.state, &self.sinks);
    }

    /// End-of-cycle pass: every worker that newly hit the miss limit gets a
    /// synthesized TIMEOUT report, fed through the normal path.
    fn reconcile(&mut self) {
        for worker in self.misses.end_cycle() {
            self.sinks
                .emit(&SupervisorEvent::new(EventId::WorkerMissing).with_worker(worker));
            let synth = HeartbeatMessage::timeout(worker);
            let action = classify(synth.worker.category(), synth.code);
            self.executor
                .execute(action, synth.worker, synth.code, &mut self.state, &self.sinks);
        }
    }

    fn note_started(&mut self, worker: WorkerId) {
        if !self.started[worker.index()] {
            self.started[worker.index()] = true;
            self.sinks
                .emit(&SupervisorEvent::new(EventId::WorkerStarted).with_worker(worker));
        }
    }

    /// Depth watermarks are advisory; the counter may race producers, so
    /// they only ever produce events.
    fn watermark_depth(&self) {
        let depth = self.rx.depth();
        let capacity = self.rx.capacity();
        if depth >= capacity {
            self.sinks.emit(
                &SupervisorEvent::new(EventId::QueueFull)
                    .with_detail(format!("{depth}/{capacity}")),
            );
        } else if depth * 4 >= capacity * 3 {
            self.sinks.emit(
                &SupervisorEvent::new(EventId::QueueHighWater)
                    .with_detail(format!("{depth}/{capacity}")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heartbeat::{ErrorCode, ReportedStatus};
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<SupervisorEvent>>);

    impl Recorder {
        fn arc() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Vec::new())))
        }

        fn count(&self, id: EventId) -> usize {
            self.0.lock().unwrap().iter().filter(|e| e.id == id).count()
        }
    }

    impl EventSink for Recorder {
        fn record(&self, event: &SupervisorEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    fn fixture(capacity: usize) -> (Supervisor, HeartbeatSender, Arc<Recorder>) {
        let recorder = Recorder::arc();
        let cfg = Config {
            channel_capacity: capacity,
            ..Config::default()
        };
        let (sup, tx) = Supervisor::new(cfg, vec![recorder.clone()]).unwrap();
        (sup, tx, recorder)
    }

    fn send_ok(tx: &HeartbeatSender, worker: WorkerId) {
        tx.report(worker, ReportedStatus::Ok, ErrorCode::USER_NONE_FIRST)
            .unwrap();
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_empty_cycle_changes_nothing_but_miss_counts() {
        let (mut sup, _tx, _rec) = fixture(0);
        let stop = CancellationToken::new();
        let outcome = sup.run_cycle(&stop).await;
        assert!(outcome.continue_running);
        assert!(!outcome.new_error);
        assert_eq!(sup.state().error_total(), 0);
        assert!(sup.state().keep_running());
        for worker in WorkerId::ALL {
            assert_eq!(sup.missing_count(worker), 1);
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_healthy_population_stays_quiet_for_ten_cycles() {
        let (mut sup, tx, rec) = fixture(0);
        let stop = CancellationToken::new();
        for _ in 0..10 {
            for worker in WorkerId::ALL {
                send_ok(&tx, worker);
            }
            let outcome = sup.run_cycle(&stop).await;
            assert!(outcome.continue_running);
            assert!(!outcome.new_error);
            for worker in WorkerId::ALL {
                assert_eq!(sup.missing_count(worker), 0);
            }
        }
        assert_eq!(sup.state().error_total(), 0);
        // One started event per worker, on first heartbeat only.
        assert_eq!(rec.count(EventId::WorkerStarted), WorkerId::COUNT);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_silent_worker_times_out_exactly_once_on_third_cycle() {
        let (mut sup, tx, rec) = fixture(0);
        let stop = CancellationToken::new();
        let silent = WorkerId::Logger;

        for cycle in 1..=5u8 {
            for worker in WorkerId::ALL {
                if worker != silent {
                    send_ok(&tx, worker);
                }
            }
            let outcome = sup.run_cycle(&stop).await;
            match cycle {
                1 | 2 => {
                    assert!(!outcome.new_error);
                    assert_eq!(sup.missing_count(silent), cycle);
                }
                3 => {
                    // TIMEOUT classifies to NotifyOnly: counted, no cancel.
                    assert!(outcome.new_error);
                    assert_eq!(sup.state().error_total(), 1);
                    assert_eq!(sup.missing_count(silent), 3);
                    assert!(!sup.cancel_token(silent).is_cancelled());
                }
                _ => {
                    assert!(!outcome.new_error);
                    assert_eq!(sup.state().error_total(), 1);
                    assert_eq!(sup.missing_count(silent), 3);
                }
            }
            assert!(outcome.continue_running);
        }
        assert_eq!(rec.count(EventId::WorkerMissing), 1);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_bounded_batch_leaves_overflow_for_next_cycle() {
        let (mut sup, tx, rec) = fixture(128);
        let stop = CancellationToken::new();
        let limit = WorkerId::COUNT * 20 + 1;

        for _ in 0..limit + 4 {
            send_ok(&tx, WorkerId::MoistureSensor);
        }
        sup.run_cycle(&stop).await;
        assert_eq!(rec.count(EventId::CycleOverrun), 1);
        // Exactly `limit` consumed; the overflow stays queued.
        assert_eq!(sup.channel_depth(), 4);

        sup.run_cycle(&stop).await;
        // No messages lost: the leftover four drained without a second
        // overrun, and none of them produced an error.
        assert_eq!(sup.channel_depth(), 0);
        assert_eq!(rec.count(EventId::CycleOverrun), 1);
        assert_eq!(sup.state().error_total(), 0);
        assert_eq!(sup.missing_count(WorkerId::MoistureSensor), 0);
        assert_eq!(sup.receive_errors(), 0);
        drop(tx);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_terminate_all_cancels_every_worker_once() {
        let (mut sup, tx, rec) = fixture(0);
        let stop = CancellationToken::new();
        tx.report(
            WorkerId::LightSensor,
            ReportedStatus::Error,
            ErrorCode::USER_TERM_ALL_FIRST,
        )
        .unwrap();

        let outcome = sup.run_cycle(&stop).await;
        assert!(!outcome.continue_running);
        assert!(outcome.new_error);
        assert_eq!(sup.state().error_total(), 1);
        assert!(!sup.state().keep_running());
        for worker in WorkerId::ALL {
            assert!(sup.cancel_token(worker).is_cancelled());
        }
        assert_eq!(rec.count(EventId::CancelAllRequested), 1);
        assert_eq!(rec.count(EventId::ActionTaken), 1);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_terminate_worker_cancels_only_the_reporter() {
        let (mut sup, tx, _rec) = fixture(0);
        let stop = CancellationToken::new();
        tx.report(
            WorkerId::RemoteComm,
            ReportedStatus::Error,
            ErrorCode::USER_TERM_WORKER_FIRST,
        )
        .unwrap();

        let outcome = sup.run_cycle(&stop).await;
        assert!(outcome.continue_running);
        assert!(outcome.new_error);
        assert_eq!(sup.state().error_total(), 1);
        assert!(sup.state().keep_running());
        for worker in WorkerId::ALL {
            assert_eq!(
                sup.cancel_token(worker).is_cancelled(),
                worker == WorkerId::RemoteComm
            );
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_stop_request_aborts_before_reconciling() {
        let (mut sup, _tx, rec) = fixture(0);
        let stop = CancellationToken::new();
        stop.cancel();

        let outcome = sup.run_cycle(&stop).await;
        assert!(outcome.continue_running);
        assert!(!outcome.new_error);
        assert_eq!(rec.count(EventId::StopRequested), 1);
        // Reconciling was skipped: no misses were charged.
        for worker in WorkerId::ALL {
            assert_eq!(sup.missing_count(worker), 0);
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_closed_channel_is_a_local_receive_error() {
        let (mut sup, tx, rec) = fixture(0);
        let stop = CancellationToken::new();
        drop(tx);

        let outcome = sup.run_cycle(&stop).await;
        assert!(outcome.continue_running);
        assert!(!outcome.new_error);
        assert_eq!(sup.receive_errors(), 1);
        assert_eq!(rec.count(EventId::ReceiveError), 1);
        // Transport errors never feed the classifier.
        assert_eq!(sup.state().error_total(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let cfg = Config {
            miss_limit: 0,
            ..Config::default()
        };
        assert!(Supervisor::new(cfg, Vec::new()).is_err());
    }
}
