//! Convergence engine.
//!
//! Iterates a [`Recurrence`] for a single parameter value until successive
//! iterates settle below the stability threshold or the iteration budget runs
//! out. Both endings produce a [`Point`]; running out of iterations is the
//! expected result for oscillating and chaotic parameters, not a failure.
//!
//! The engine is pure and holds no state, so any number of invocations may run
//! concurrently on the blocking pool.

use crate::domain::models::{Outcome, Point, SweepConfig};
use crate::domain::ports::Recurrence;

/// Compute the long-run value of `recurrence` at `parameter`.
///
/// At least one step is always taken: convergence is only declared from a
/// delta that was actually computed, never from the starting value alone.
/// A non-finite iterate ends the loop early with [`Outcome::Exhausted`].
pub fn compute_point<R>(recurrence: &R, parameter: f64, config: &SweepConfig) -> Point
where
    R: Recurrence + ?Sized,
{
    let threshold = config.stability_threshold;
    let budget = config.max_iterations.max(1);

    let mut n = config.initial_population;
    let mut iterations = 0u32;
    let mut outcome = Outcome::Exhausted;

    while iterations < budget {
        let next = recurrence.step(parameter, n);
        let delta = (next - n).abs();
        n = next;
        iterations += 1;

        if delta < threshold {
            outcome = Outcome::Converged;
            break;
        }
        if !n.is_finite() {
            break;
        }
    }

    Point {
        parameter,
        value: n,
        iterations,
        outcome,
    }
}
