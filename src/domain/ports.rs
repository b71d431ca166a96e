//! Ports (trait seams) of the sweep engine.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::SweepResult;
use crate::domain::models::{Point, SweepReport};

/// A one-dimensional recurrence `n_{i+1} = f(parameter, n_i)`.
///
/// Implementations must be pure: the same inputs always produce the same
/// output, and no state is shared between calls.
pub trait Recurrence: Send + Sync + 'static {
    /// Apply one step of the recurrence.
    fn step(&self, parameter: f64, n: f64) -> f64;

    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Whether `n0` is a legal starting value for this recurrence.
    fn accepts_initial(&self, n0: f64) -> bool {
        n0.is_finite()
    }
}

/// The canonical logistic map `r * n * (1 - n)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logistic;

impl Recurrence for Logistic {
    fn step(&self, parameter: f64, n: f64) -> f64 {
        parameter * n * (1.0 - n)
    }

    fn name(&self) -> &'static str {
        "logistic"
    }

    fn accepts_initial(&self, n0: f64) -> bool {
        (0.0..=1.0).contains(&n0)
    }
}

/// Adapts a plain function or closure into a [`Recurrence`].
pub struct FnRecurrence<F> {
    name: &'static str,
    step: F,
}

impl<F> FnRecurrence<F>
where
    F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
{
    pub const fn new(name: &'static str, step: F) -> Self {
        Self { name, step }
    }
}

impl<F> Recurrence for FnRecurrence<F>
where
    F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
{
    fn step(&self, parameter: f64, n: f64) -> f64 {
        (self.step)(parameter, n)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// A producer of points that a host can drive and a consumer can drain.
#[async_trait]
pub trait Simulation: Send + Sync {
    /// Hand out the receiving end of the point channel.
    ///
    /// Returns `None` once the receiver has been taken.
    fn take_point_receiver(&self) -> Option<mpsc::Receiver<Point>>;

    /// Run the simulation until it is exhausted or `cancel` fires, then drain.
    async fn simulate(&self, cancel: CancellationToken) -> SweepResult<SweepReport>;
}
