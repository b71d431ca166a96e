//! Tracking of started-but-unfinished computations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    count: AtomicUsize,
    peak: AtomicUsize,
    idle: Notify,
}

/// Atomic count of in-flight computations with a drain waiter.
#[derive(Debug, Clone, Default)]
pub struct InFlightCounter {
    inner: Arc<Inner>,
}

/// Registration of one in-flight computation; dropping it completes the entry.
#[derive(Debug)]
#[must_use = "dropping the guard marks the computation as finished"]
pub struct InFlightGuard {
    inner: Arc<Inner>,
}

impl InFlightCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly launched computation.
    pub fn enter(&self) -> InFlightGuard {
        let now = self.inner.count.fetch_add(1, Ordering::AcqRel) + 1;
        self.inner.peak.fetch_max(now, Ordering::AcqRel);
        InFlightGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn current(&self) -> usize {
        self.inner.count.load(Ordering::Acquire)
    }

    /// Highest count observed since construction.
    pub fn peak(&self) -> usize {
        self.inner.peak.load(Ordering::Acquire)
    }

    /// Wait until no computation is in flight.
    pub async fn wait_idle(&self) {
        loop {
            // Register before checking so a wakeup between the two is not lost
            let notified = self.inner.idle.notified();
            if self.current() == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let previous = self.inner.count.fetch_sub(1, Ordering::AcqRel);
        assert!(
            previous > 0,
            "in-flight counter underflow: more completions than launches"
        );
        if previous == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_enter_and_leave() {
        let counter = InFlightCounter::new();
        let a = counter.enter();
        let b = counter.enter();
        assert_eq!(counter.current(), 2);
        drop(a);
        assert_eq!(counter.current(), 1);
        drop(b);
        assert_eq!(counter.current(), 0);
        assert_eq!(counter.peak(), 2);
    }

    #[tokio::test]
    async fn test_wait_idle_returns_immediately_when_empty() {
        let counter = InFlightCounter::new();
        tokio::time::timeout(Duration::from_millis(100), counter.wait_idle())
            .await
            .expect("idle counter should not block");
    }

    #[tokio::test]
    async fn test_wait_idle_blocks_until_last_guard_drops() {
        let counter = InFlightCounter::new();
        let guards: Vec<_> = (0..3).map(|_| counter.enter()).collect();

        let waiter = {
            let counter = counter.clone();
            tokio::spawn(async move { counter.wait_idle().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        let mut guards = guards;
        guards.pop();
        guards.pop();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        guards.clear();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
        assert_eq!(counter.peak(), 3);
    }
}
