pub mod point;
pub mod report;
pub mod sweep_config;

pub use point::{Outcome, Point};
pub use report::{SchedulerState, SweepReport};
pub use sweep_config::{ParameterSweep, SweepConfig, DEFAULT_CHANNEL_CAPACITY};
