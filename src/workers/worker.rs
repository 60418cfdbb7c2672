//! # Worker abstraction and function-backed implementation.
//!
//! This module defines the [`Worker`] trait — the per-iteration body a
//! supervised unit supplies — and [`WorkerFn`], a convenient closure-backed
//! implementation. The loop skeleton around a `Worker` (periodic wake,
//! cooperative cancellation, heartbeat emission) lives in
//! [`WorkerRuntime`](crate::workers::WorkerRuntime); the body itself only does
//! its I/O and says how it went.

use async_trait::async_trait;
use std::future::Future;

use crate::heartbeat::{ErrorCode, ReportedStatus};
use crate::workers::WorkerId;

/// What one loop iteration has to say for itself. Sent verbatim in the
/// iteration's heartbeat.
#[derive(Debug, Clone, Copy)]
pub struct Report {
    /// Self-assessment of the iteration.
    pub status: ReportedStatus,
    /// Code driving the supervisor's classification.
    pub code: ErrorCode,
}

impl Report {
    /// A healthy iteration (status `Ok`, first code of the no-action band).
    pub fn ok() -> Self {
        Self {
            status: ReportedStatus::Ok,
            code: ErrorCode::USER_NONE_FIRST,
        }
    }

    /// A failed iteration with the given code.
    pub fn error(code: ErrorCode) -> Self {
        Self {
            status: ReportedStatus::Error,
            code,
        }
    }
}

/// # One supervised unit's per-iteration body.
///
/// The runtime shim calls [`poll`](Worker::poll) once per wake-up; the
/// returned [`Report`] becomes that iteration's heartbeat. Implementations
/// should complete promptly relative to the worker period — cancellation is
/// cooperative and is only observed between iterations.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use plantvisor::{Report, Worker, WorkerId};
///
/// struct MoistureReader;
///
/// #[async_trait]
/// impl Worker for MoistureReader {
///     fn id(&self) -> WorkerId { WorkerId::MoistureSensor }
///
///     async fn poll(&mut self) -> Report {
///         // read the sensor...
///         Report::ok()
///     }
/// }
/// ```
#[async_trait]
pub trait Worker: Send + 'static {
    /// The fixed identity this body runs under.
    fn id(&self) -> WorkerId;

    /// Runs one iteration and reports how it went.
    async fn poll(&mut self) -> Report;
}

/// Function-backed worker implementation.
///
/// Wraps a closure that produces a fresh future per iteration.
pub struct WorkerFn<F> {
    id: WorkerId,
    f: F,
}

impl<F> WorkerFn<F> {
    /// Creates a new function-backed worker.
    ///
    /// ## Example
    /// ```
    /// use plantvisor::{Report, WorkerFn, WorkerId};
    ///
    /// let w = WorkerFn::new(WorkerId::LightSensor, || async { Report::ok() });
    /// # let _ = w;
    /// ```
    pub fn new(id: WorkerId, f: F) -> Self {
        Self { id, f }
    }
}

#[async_trait]
impl<F, Fut> Worker for WorkerFn<F>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Report> + Send + 'static,
{
    fn id(&self) -> WorkerId {
        self.id
    }

    async fn poll(&mut self) -> Report {
        (self.f)().await
    }
}
