//! Scheduler lifecycle state and the summary of a finished sweep.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Lifecycle of a sweep scheduler. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerState {
    /// Constructed, `run` not called yet.
    Idle,
    /// Admitting parameters into the pool.
    Sweeping,
    /// No more admissions; waiting for in-flight work.
    Draining,
    /// All admitted work has completed.
    Done,
}

/// Summary of one sweep run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Identifier used to correlate the run's log lines
    pub run_id: Uuid,
    /// Number of parameter samples in the configured domain
    pub sample_count: usize,
    /// Computations that acquired a permit and were launched
    pub admitted: usize,
    /// Points delivered into the channel
    pub emitted: usize,
    /// Emitted points that converged
    pub converged: usize,
    /// Emitted points that exhausted the iteration budget
    pub exhausted: usize,
    /// Computations that panicked and produced no point
    pub failed: usize,
    /// Whether the host cancelled before the domain was exhausted
    pub cancelled: bool,
    /// Highest number of simultaneously running computations
    pub peak_in_flight: usize,
    /// Wall-clock duration of the run, including drain
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

impl SweepReport {
    /// Whether every sample of the domain was admitted.
    pub const fn is_complete(&self) -> bool {
        !self.cancelled && self.admitted == self.sample_count
    }

    /// Fraction of emitted points that converged.
    pub fn convergence_rate(&self) -> f64 {
        if self.emitted == 0 {
            return 0.0;
        }
        self.converged as f64 / self.emitted as f64
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
