//! Domain errors for the sweep engine.

use thiserror::Error;

/// Errors raised by the sweep engine.
///
/// Non-convergence is not represented here: a parameter that never settles
/// terminates through the iteration cap and still yields a point.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SweepError {
    #[error("Invalid parameter range: range_start ({start}) must be less than range_end ({end})")]
    InvalidRange { start: f64, end: f64 },

    #[error("Invalid step_size: {0}. Must be positive")]
    InvalidStepSize(f64),

    #[error("Invalid initial_population {value} for recurrence '{recurrence}'")]
    InvalidInitialPopulation { value: f64, recurrence: &'static str },

    #[error(
        "Invalid step_size: {step} does not separate samples near {magnitude}; \
         consecutive parameters would repeat"
    )]
    StepBelowResolution { step: f64, magnitude: f64 },

    #[error("Invalid stability_threshold: {0}. Must be positive")]
    InvalidStabilityThreshold(f64),

    #[error("Invalid max_iterations: {0}. Must be at least 1")]
    InvalidMaxIterations(u32),

    #[error("Invalid max_concurrency: {0}. Must be at least 1")]
    InvalidMaxConcurrency(usize),

    #[error("Invalid channel_capacity: {0}. Must be at least 1")]
    InvalidChannelCapacity(usize),

    #[error("Configuration field '{0}' must be a finite number")]
    NonFinite(&'static str),

    #[error("Sweep has already been started; a scheduler runs exactly once")]
    AlreadyStarted,

    #[error("Admission pool was closed while the sweep was running")]
    PoolClosed,
}

pub type SweepResult<T> = Result<T, SweepError>;
