//! Admission pool: a counting semaphore bounding concurrent computations.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::domain::errors::{SweepError, SweepResult};

/// Fixed-capacity pool of admission permits.
#[derive(Debug, Clone)]
pub struct AdmissionPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One unit of concurrency capacity.
///
/// The permit goes back to the pool when this value is dropped, so it is
/// released exactly once no matter how the holder finishes.
#[derive(Debug)]
#[must_use = "dropping the permit releases the admission slot immediately"]
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionPool {
    pub fn new(capacity: usize) -> SweepResult<Self> {
        if capacity == 0 || u32::try_from(capacity).is_err() {
            return Err(SweepError::InvalidMaxConcurrency(capacity));
        }
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// Wait for a permit unless `cancel` fires first.
    ///
    /// Returns `Ok(None)` on cancellation. Cancellation wins when both are
    /// ready at once; the pending acquire is dropped without taking a permit.
    pub async fn acquire(&self, cancel: &CancellationToken) -> SweepResult<Option<AdmissionPermit>> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Ok(None),
            permit = Arc::clone(&self.semaphore).acquire_owned() => {
                let permit = permit.map_err(|_| SweepError::PoolClosed)?;
                Ok(Some(AdmissionPermit { _permit: permit }))
            }
        }
    }

    /// Take a permit without waiting, if one is free.
    pub fn try_acquire(&self) -> Option<AdmissionPermit> {
        Arc::clone(&self.semaphore)
            .try_acquire_owned()
            .ok()
            .map(|permit| AdmissionPermit { _permit: permit })
    }

    /// Wait until every permit is back in the pool.
    ///
    /// All permits are taken at once and handed straight back, so this
    /// returns only at a moment when nothing was holding one.
    pub async fn wait_all_returned(&self) -> SweepResult<()> {
        let all = u32::try_from(self.capacity)
            .map_err(|_| SweepError::InvalidMaxConcurrency(self.capacity))?;
        let permits = self
            .semaphore
            .acquire_many(all)
            .await
            .map_err(|_| SweepError::PoolClosed)?;
        drop(permits);
        Ok(())
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Permits currently held.
    pub fn outstanding(&self) -> usize {
        self.capacity - self.available()
    }
}
