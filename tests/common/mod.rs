//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bifurcate::{Recurrence, SweepConfig};

/// Sweep over `[start, end)` with a quick-converging engine setup.
pub fn sweep_config(start: f64, end: f64, step: f64, max_concurrency: usize) -> SweepConfig {
    SweepConfig {
        range_start: start,
        range_end: end,
        step_size: step,
        initial_population: 0.4,
        stability_threshold: 1e-7,
        max_iterations: 10_000,
        max_concurrency,
        ..SweepConfig::default()
    }
}

/// Recurrence that sleeps on every step and tracks how many steps run at once.
///
/// It jumps straight to 0.5 and stays there, so each computation takes two
/// iterations.
#[derive(Clone)]
pub struct GaugedRecurrence {
    pub current: Arc<AtomicUsize>,
    pub peak: Arc<AtomicUsize>,
    pub calls: Arc<AtomicUsize>,
    delay: Duration,
}

impl GaugedRecurrence {
    pub fn new(delay: Duration) -> Self {
        Self {
            current: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(AtomicUsize::new(0)),
            delay,
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Recurrence for GaugedRecurrence {
    fn step(&self, _parameter: f64, _n: f64) -> f64 {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.current.fetch_sub(1, Ordering::SeqCst);
        0.5
    }

    fn name(&self) -> &'static str {
        "gauged"
    }
}
