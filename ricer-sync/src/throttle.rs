//! Concurrency throttle, a counting semaphore in front of the blocking pool.
//!
//! [`Throttle::dispatch`] waits for a permit *before* spawning, so the
//! dispatcher is held back while [`Throttle::limit`] jobs are running and no
//! backlog of spawned-but-waiting tasks builds up. [`Throttle::join`] is the
//! barrier: it returns once every dispatched job has finished.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use crate::error::SyncError;

/// Render jobs allowed to run at the same time.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Outcome of one dispatched job; `Err` means the job panicked.
pub type JobResult<T> = Result<T, JoinError>;

pub struct Throttle<T> {
    semaphore: Arc<Semaphore>,
    limit: usize,
    tasks: JoinSet<T>,
}

impl<T: Send + 'static> Throttle<T> {
    /// A throttle admitting `limit` concurrent jobs (at least one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
            tasks: JoinSet::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Jobs currently holding a permit.
    pub fn in_flight(&self) -> usize {
        self.limit - self.semaphore.available_permits()
    }

    /// Run `job` on the blocking pool once a slot is free.
    ///
    /// Completes as soon as the job has been spawned, not when it finishes.
    pub async fn dispatch<F>(&mut self, job: F) -> Result<(), SyncError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| SyncError::ThrottleClosed)?;
        self.tasks.spawn_blocking(move || {
            // Released on return and on unwind alike.
            let _permit = permit;
            job()
        });
        Ok(())
    }

    /// Wait for every dispatched job. Results arrive in completion order.
    pub async fn join(mut self) -> Vec<JobResult<T>> {
        let mut results = Vec::with_capacity(self.tasks.len());
        while let Some(result) = self.tasks.join_next().await {
            results.push(result);
        }
        results
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
