use std::future::Future;
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinError;
use tokio_util::task::TaskTracker;

pub const DEFAULT_WORKER_POOL_SIZE: usize = 4;

/// Fixed number of execution slots for blocking extraction and model calls.
///
/// Submitted work is spawned, so it runs to completion even when the caller
/// stops waiting. [`WorkerPool::drain`] refuses new work and waits for
/// everything in flight.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    tracker: TaskTracker,
    size: usize,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            tracker: TaskTracker::new(),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    pub async fn run_blocking<F, R>(&self, task: F) -> Result<R, WorkerPoolError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let permit = self.acquire().await?;
        self.tracker
            .spawn_blocking(move || {
                let _permit = permit;
                task()
            })
            .await
            .map_err(WorkerPoolError::from)
    }

    pub async fn run<F>(&self, task: F) -> Result<F::Output, WorkerPoolError>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let permit = self.acquire().await?;
        self.tracker
            .spawn(async move {
                let _permit = permit;
                task.await
            })
            .await
            .map_err(WorkerPoolError::from)
    }

    pub async fn drain(&self) {
        self.tracker.close();
        self.permits.close();
        tracing::info!(in_flight = self.tracker.len(), "Draining worker pool");
        self.tracker.wait().await;
        tracing::info!("Worker pool drained");
    }

    async fn acquire(&self) -> Result<OwnedSemaphorePermit, WorkerPoolError> {
        if self.tracker.is_closed() {
            return Err(WorkerPoolError::ShuttingDown);
        }
        Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| WorkerPoolError::ShuttingDown)
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_WORKER_POOL_SIZE)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerPoolError {
    #[error("worker pool is shutting down")]
    ShuttingDown,
    #[error("worker task panicked: {0}")]
    Panicked(String),
    #[error("worker task cancelled")]
    Cancelled,
}

impl From<JoinError> for WorkerPoolError {
    fn from(err: JoinError) -> Self {
        if err.is_panic() {
            WorkerPoolError::Panicked(err.to_string())
        } else {
            WorkerPoolError::Cancelled
        }
    }
}
