//! Infrastructure layer module
//!
//! Configuration loading and logging setup for the binary and embedding hosts.

pub mod config;
pub mod logging;
