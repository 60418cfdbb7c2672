//! # plantvisor
//!
//! **Plantvisor** is the supervision core of an automated plant-watering
//! controller.
//!
//! A fixed population of async workers (sensor polling, remote
//! communication, logging) reports once per loop iteration over a bounded
//! heartbeat channel. A supervisor drains those reports on a fixed cadence,
//! classifies every error code into exactly one course of action, tracks
//! workers that go silent, and escalates through cooperative cancellation.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌───────────────┐   ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//!     │ WorkerRuntime │   │ WorkerRuntime │   │ WorkerRuntime │   │ WorkerRuntime │
//!     │(moisture-sens)│   │ (light-sens)  │   │ (remote-comm) │   │   (logger)    │
//!     └──────┬────────┘   └──────┬────────┘   └──────┬────────┘   └──────┬────────┘
//!            │ HeartbeatMessage  │                   │                   │
//!            └───────────────────┴───────┬───────────┴───────────────────┘
//!                                        ▼
//!                    ┌────────────────────────────────────────┐
//!                    │   heartbeat channel (bounded, FIFO)    │
//!                    │        depth / capacity tracked        │
//!                    └───────────────────┬────────────────────┘
//!                                        ▼
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │  Supervisor::run_cycle (once per supervisory tick)                    │
//! │  - bounded drain (workers × 20 + 1 messages max)                      │
//! │  - MissTracker (consecutive silent cycles, timeout synthesis)         │
//! │  - classify(category, code) ─► exactly one CourseOfAction            │
//! │  - ActionExecutor (counters + per-worker CancellationTokens)          │
//! │  - SinkSet (fans events out to EventSink implementations)             │
//! └──────┬──────────────────────────────────────────────────────┬─────────┘
//!        │ CancellationToken (per worker, under one root)       │
//!        ▼                                                      ▼
//!   WorkerRuntime loops observe their token                SupervisorEvent
//!   cooperatively and send a final Terminated              ─► LogWriter /
//!   heartbeat before exiting                                  custom sinks
//! ```
//!
//! ### Escalation
//! ```text
//! report / synthesized timeout ──► classify(category, code)
//!
//!   None            ─► nothing
//!   NotifyOnly      ─► error_total += 1
//!   RestartWorker   ─► error_total += 1   (restart is a placeholder)
//!   TerminateWorker ─► error_total += 1, cancel that worker
//!   TerminateAll    ─► error_total += 1, keep_running = false,
//!                      cancel every worker exactly once
//!
//! unknown codes fail closed to TerminateAll
//! ```
//!
//! ## Features
//! | Area              | Description                                                       | Key types / traits                        |
//! |-------------------|-------------------------------------------------------------------|-------------------------------------------|
//! | **Workers**       | Fixed worker identities and the periodic report loop.             | [`WorkerId`], [`Worker`], [`WorkerRuntime`] |
//! | **Heartbeats**    | Bounded non-blocking transport and the report message itself.     | [`HeartbeatSender`], [`HeartbeatMessage`] |
//! | **Classification**| Pure error-code-to-action mapping, fail-closed.                   | [`classify`], [`CourseOfAction`]          |
//! | **Supervision**   | The drain/track/act cycle and its outcome.                        | [`Supervisor`], [`CycleOutcome`]          |
//! | **Events**        | Structured observability fan-out.                                 | [`EventSink`], [`SupervisorEvent`]        |
//! | **Errors**        | Typed configuration and transport errors.                         | [`ConfigError`], [`HeartbeatSendError`]   |
//! | **Configuration** | Periods, miss limit, channel sizing.                              | [`Config`]                                |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use plantvisor::{Config, EventSink, Report, Supervisor, WorkerFn, WorkerId, WorkerRuntime};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::default();
//!
//!     // Build event sinks (optional)
//!     #[cfg(feature = "logging")]
//!     let sinks: Vec<Arc<dyn EventSink>> = {
//!         use plantvisor::LogWriter;
//!         vec![Arc::new(LogWriter::default())]
//!     };
//!     #[cfg(not(feature = "logging"))]
//!     let sinks: Vec<Arc<dyn EventSink>> = Vec::new();
//!
//!     let (mut sup, tx) = Supervisor::new(cfg.clone(), sinks)?;
//!
//!     // One runtime per worker identity; real drivers would live in the
//!     // closures.
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
//!     for _ in 0..3 {
//!         tick.tick().await;
//!         let outcome = sup.run_cycle(&stop).await;
//!         if !outcome.continue_running {
//!             break;
//!         }
//!     }
//!     stop.cancel();
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod heartbeat;
mod workers;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{classify, CourseOfAction, CycleOutcome, Supervisor, SupervisorState};
pub use error::{ConfigError, HeartbeatSendError};
pub use events::{EventId, EventSink, Severity, SinkSet, SupervisorEvent};
pub use heartbeat::{
    heartbeat_channel, ErrorCode, HeartbeatMessage, HeartbeatReceiver, HeartbeatSender,
    RecvOutcome, ReportedStatus, WorkerState,
};
pub use workers::{Report, Worker, WorkerCategory, WorkerFn, WorkerId, WorkerRuntime};

// Optional: expose a simple built-in logger sink (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use events::LogWriter;
