//! Sweep output records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a convergence computation terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Successive iterates fell below the stability threshold.
    Converged,
    /// The iteration budget ran out first (oscillation, chaos, divergence).
    Exhausted,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Converged => "converged",
            Self::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One computed sample of the sweep.
///
/// Created inside a single convergence computation and moved into the point
/// channel; nothing else holds a reference to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Control parameter this point was computed for
    pub parameter: f64,
    /// Last iterate of the recurrence
    pub value: f64,
    /// Number of recurrence steps performed
    pub iterations: u32,
    /// Whether the computation converged or ran out of iterations
    pub outcome: Outcome,
}

impl Point {
    pub const fn is_converged(&self) -> bool {
        matches!(self.outcome, Outcome::Converged)
    }

    /// Fraction of the iteration budget this point consumed, in `[0, 1]`.
    ///
    /// Used as a third display dimension (e.g. colour) next to parameter and value.
    pub fn classification(&self, max_iterations: u32) -> f64 {
        if max_iterations == 0 {
            return 0.0;
        }
        (f64::from(self.iterations) / f64::from(max_iterations)).clamp(0.0, 1.0)
    }
}
