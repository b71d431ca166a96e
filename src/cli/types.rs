//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::services::coordinate_mapping::DisplayMode;

#[derive(Parser, Debug)]
#[command(name = "bifurcate")]
#[command(about = "Bifurcate - bounded-parallel parameter sweeps of nonlinear recurrences", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file layered over bifurcate.yaml
    #[arg(short, long, global = true, env = "BIFURCATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a parameter sweep and collect its points
    Run(RunArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// First parameter value (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub range_start: Option<f64>,

    /// End of the parameter domain (exclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub range_end: Option<f64>,

    /// Distance between parameter samples
    #[arg(long)]
    pub step_size: Option<f64>,

    /// Starting value of the recurrence
    #[arg(long)]
    pub initial_population: Option<f64>,

    /// Convergence threshold on successive iterates
    #[arg(long)]
    pub stability_threshold: Option<f64>,

    /// Iteration budget per parameter
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Maximum concurrent computations
    #[arg(short = 'k', long)]
    pub max_concurrency: Option<usize>,

    /// Write points to this file ("-", the default, for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Point file format
    #[arg(short, long, value_enum, default_value_t = PointFormat::Csv)]
    pub format: PointFormat,

    /// Include display coordinates with each point
    #[arg(long)]
    pub screen: bool,

    /// Override the configured display mode
    #[arg(long)]
    pub mode: Option<DisplayMode>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Format of written point files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PointFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// One JSON object per line
    Ndjson,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Validate the effective configuration
    Validate,
}
