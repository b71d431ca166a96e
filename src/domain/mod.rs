//! Domain layer for the sweep engine
//!
//! Configuration, output records and the trait seams the services are built on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{SweepError, SweepResult};
