//! # Cancellation routing.
//!
//! One child [`CancellationToken`] per worker under a shared root. A request
//! for worker *w* cancels exactly *w*'s token, and "cancel all" walks the
//! population, each worker exactly once.
//!
//! The tokens only *request* cancellation. Workers observe their token
//! cooperatively, once at the top of each loop iteration (see
//! [`WorkerRuntime`](crate::workers::WorkerRuntime)).

use tokio_util::sync::CancellationToken;

use crate::workers::WorkerId;

/// Per-worker cancellation tokens under one root.
pub(crate) struct CancelRegistry {
    root: CancellationToken,
    per_worker: [CancellationToken; WorkerId::COUNT],
}

impl CancelRegistry {
    pub(crate) fn new() -> Self {
        let root = CancellationToken::new();
        let per_worker = std::array::from_fn(|_| root.child_token());
        Self { root, per_worker }
    }

    /// Requests cancellation of exactly one worker.
    pub(crate) fn request(&self, worker: WorkerId) {
        self.per_worker[worker.index()].cancel();
    }

    /// Requests cancellation of every known worker, each exactly once.
    pub(crate) fn request_all(&self) {
        for worker in WorkerId::ALL {
            self.request(worker);
        }
    }

    /// The token `worker`'s runtime should observe.
    pub(crate) fn token_for(&self, worker: WorkerId) -> CancellationToken {
        self.per_worker[worker.index()].clone()
    }

    /// Root token; cancelling it propagates to every worker (used by
    /// embedders that want one external kill switch).
    pub(crate) fn root(&self) -> CancellationToken {
        self.root.clone()
    }
}
