//! Bifurcate - bounded-parallel parameter sweeps of nonlinear recurrences
//!
//! A sweep walks a parameter range in fixed steps. Each sample is iterated
//! to a stable value (or until its iteration budget runs out) on a blocking
//! worker, with at most `max_concurrency` computations in flight. Finished
//! points stream to the caller over a bounded channel and can be mapped to
//! display coordinates.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): configuration, points, reports and the
//!   `Recurrence` / `Simulation` ports
//! - **Service Layer** (`services`): convergence engine, admission pool,
//!   sweep scheduler, point collector and coordinate mapping
//! - **Infrastructure Layer** (`infrastructure`): layered configuration and logging
//! - **CLI Layer** (`cli`): the `bifurcate` command-line interface
//!
//! # Example
//!
//! ```ignore
//! use bifurcate::{Logistic, PointCollector, SweepConfig, SweepScheduler};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SweepConfig { range_start: 2.8, ..SweepConfig::default() };
//!     let scheduler = SweepScheduler::new(config, Logistic)?;
//!     let rx = scheduler.take_point_receiver().expect("receiver");
//!     let cancel = CancellationToken::new();
//!
//!     let collect = tokio::spawn(async move {
//!         PointCollector::new(rx).collect(&CancellationToken::new(), |_| {}).await
//!     });
//!     let report = scheduler.run(cancel).await?;
//!     drop(scheduler);
//!     let points = collect.await?;
//!     assert_eq!(points.len(), report.emitted);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{Outcome, Point, SchedulerState, SweepConfig, SweepReport};
pub use domain::ports::{FnRecurrence, Logistic, Recurrence, Simulation};
pub use domain::{SweepError, SweepResult};
pub use infrastructure::config::{AppConfig, ConfigError, ConfigLoader};
pub use services::{
    compute_point, map_to_display, DisplayMode, PointCollector, ScreenPosition, SweepScheduler,
};
