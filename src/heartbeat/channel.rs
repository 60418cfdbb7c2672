//! # Bounded MPSC transport for heartbeats.
//!
//! Many workers produce, one supervisor consumes. Thin wrapper over
//! [`tokio::sync::mpsc`] that adds an explicit depth counter so the consumer
//! can watermark fill levels without draining.
//!
//! ## Architecture
//! ```text
//! Producers (many):                       Consumer (one):
//!   WorkerRuntime 1 ──┐
//!   WorkerRuntime 2 ──┼──► [bounded queue] ──► Supervisor::run_cycle
//!   WorkerRuntime N ──┘      depth / capacity
//! ```
//!
//! ## Rules
//! - **Non-blocking send**: a full channel rejects the message with
//!   [`HeartbeatSendError::Full`]; a worker never stalls on supervision
//!   plumbing.
//! - **FIFO**: delivery preserves send order; in particular messages from one
//!   producer arrive in the order they were sent.
//! - **Bounded receive**: [`HeartbeatReceiver::recv_within`] waits at most the
//!   given poll timeout, so the consumer always completes in bounded time.
//! - **Depth over-approximates**: the counter is incremented before the
//!   enqueue and decremented after the dequeue, so it can briefly exceed the
//!   true queue size but can never underflow; it exists for watermark
//!   logging, not for flow control.

use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

use crate::error::HeartbeatSendError;
use crate::heartbeat::codes::ErrorCode;
use crate::heartbeat::message::{HeartbeatMessage, ReportedStatus};
use crate::workers::WorkerId;

/// Outcome of one bounded receive attempt.
#[derive(Debug)]
pub enum RecvOutcome {
    /// The oldest pending message.
    Message(HeartbeatMessage),
    /// Nothing arrived within the poll timeout.
    Empty,
    /// Every producer handle has been dropped.
    Closed,
}

/// Creates a bounded heartbeat channel with the given capacity (clamped to a
/// minimum of 1).
pub fn heartbeat_channel(capacity: usize) -> (HeartbeatSender, HeartbeatReceiver) {
    let capacity = capacity.max(1);
    let depth = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = mpsc::channel(capacity);
    (
        HeartbeatSender {
            tx,
            depth: Arc::clone(&depth),
            capacity,
        },
        HeartbeatReceiver {
            rx,
            depth,
            capacity,
        },
    )
}

/// Producer handle; cheap to clone, one per worker.
#[derive(Clone)]
pub struct HeartbeatSender {
    tx: mpsc::Sender<HeartbeatMessage>,
    depth: Arc<AtomicUsize>,
    capacity: usize,
}

impl HeartbeatSender {
    /// Enqueues a message without blocking.
    pub fn send(&self, msg: HeartbeatMessage) -> Result<(), HeartbeatSendError> {
        // Count before the enqueue: the consumer may dequeue and decrement
        // the instant the message becomes visible, and the counter must
        // never underflow.
        self.depth.fetch_add(1, AtomicOrdering::Relaxed);
        match self.tx.try_send(msg) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(msg)) => {
                self.depth.fetch_sub(1, AtomicOrdering::Relaxed);
                Err(HeartbeatSendError::Full(msg))
            }
            Err(mpsc::error::TrySendError::Closed(msg)) => {
                self.depth.fetch_sub(1, AtomicOrdering::Relaxed);
                Err(HeartbeatSendError::Closed(msg))
            }
        }
    }

    /// Convenience for the once-per-iteration worker report.
    pub fn report(
        &self,
        worker: WorkerId,
        status: ReportedStatus,
        code: ErrorCode,
    ) -> Result<(), HeartbeatSendError> {
        self.send(HeartbeatMessage::new(worker, status, code))
    }

    /// Channel capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Consumer handle, owned by the supervisor.
pub struct HeartbeatReceiver {
    rx: mpsc::Receiver<HeartbeatMessage>,
    depth: Arc<AtomicUsize>,
    capacity: usize,
}

impl HeartbeatReceiver {
    /// Returns the oldest pending message, or `None` without blocking.
    pub fn try_recv_one(&mut self) -> Option<HeartbeatMessage> {
        match self.rx.try_recv() {
            Ok(msg) => {
                self.depth.fetch_sub(1, AtomicOrdering::Relaxed);
                Some(msg)
            }
            Err(_) => None,
        }
    }

    /// Waits at most `poll` for the oldest pending message.
    pub async fn recv_within(&mut self, poll: Duration) -> RecvOutcome {
        match time::timeout(poll, self.rx.recv()).await {
            Err(_elapsed) => RecvOutcome::Empty,
            Ok(None) => RecvOutcome::Closed,
            Ok(Some(msg)) => {
                self.depth.fetch_sub(1, AtomicOrdering::Relaxed);
                RecvOutcome::Message(msg)
            }
        }
    }

    /// Number of messages currently queued (advisory).
    pub fn depth(&self) -> usize {
        self.depth.load(AtomicOrdering::Relaxed)
    }

    /// Channel capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_msg(worker: WorkerId) -> HeartbeatMessage {
        HeartbeatMessage::new(worker, ReportedStatus::Ok, ErrorCode::USER_NONE_FIRST)
    }

    #[test]
    fn test_fifo_order_single_producer() {
        let (tx, mut rx) = heartbeat_channel(8);
        for _ in 0..3 {
            tx.send(ok_msg(WorkerId::Logger)).unwrap();
        }
        let mut last = None;
        while let Some(msg) = rx.try_recv_one() {
            if let Some(prev) = last {
                assert!(msg.origin > prev);
            }
            last = Some(msg.origin);
        }
    }

    #[test]
    fn test_depth_tracks_sends_and_receives() {
        let (tx, mut rx) = heartbeat_channel(4);
        assert_eq!(rx.depth(), 0);
        tx.send(ok_msg(WorkerId::LightSensor)).unwrap();
        tx.send(ok_msg(WorkerId::LightSensor)).unwrap();
        assert_eq!(rx.depth(), 2);
        rx.try_recv_one().unwrap();
        assert_eq!(rx.depth(), 1);
    }

    #[test]
    fn test_full_channel_rejects_without_blocking() {
        let (tx, mut rx) = heartbeat_channel(2);
        tx.send(ok_msg(WorkerId::RemoteComm)).unwrap();
        tx.send(ok_msg(WorkerId::RemoteComm)).unwrap();
        let err = tx.send(ok_msg(WorkerId::RemoteComm)).unwrap_err();
        assert!(matches!(err, HeartbeatSendError::Full(_)));
        assert_eq!(err.as_label(), "heartbeat_channel_full");
        // A rejected send leaves the depth counter untouched.
        assert_eq!(rx.depth(), 2);

        // Draining one slot makes send succeed again; nothing was lost.
        rx.try_recv_one().unwrap();
        tx.send(ok_msg(WorkerId::RemoteComm)).unwrap();
        assert_eq!(rx.depth(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_depth_never_underflows_under_concurrent_send_receive() {
        // Capacity exceeds the message count so every send lands on the
        // first try; depth must stay within [0, capacity] no matter how the
        // producer and consumer threads interleave.
        let (tx, mut rx) = heartbeat_channel(2048);
        let total = 2000usize;

        let producer = tokio::spawn(async move {
            for i in 0..total {
                tx.send(ok_msg(WorkerId::MoistureSensor)).unwrap();
                if i % 7 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        });

        let mut received = 0usize;
        while received < total {
            if rx.try_recv_one().is_some() {
                received += 1;
            } else {
                tokio::task::yield_now().await;
            }
            let depth = rx.depth();
            assert!(depth <= rx.capacity(), "depth underflowed: {depth}");
        }
        producer.await.unwrap();
        assert_eq!(rx.depth(), 0);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_recv_within_reports_empty_then_closed() {
        let (tx, mut rx) = heartbeat_channel(2);
        assert!(matches!(
            rx.recv_within(Duration::from_millis(10)).await,
            RecvOutcome::Empty
        ));
        drop(tx);
        assert!(matches!(
            rx.recv_within(Duration::from_millis(10)).await,
            RecvOutcome::Closed
        ));
    }
}
