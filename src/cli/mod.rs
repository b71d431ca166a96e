//! Command-line interface for the `bifurcate` binary.

pub mod commands;
pub mod output;
pub mod point_writer;
pub mod types;

pub use output::{output, CommandOutput};
pub use point_writer::PointWriter;
pub use types::{Cli, Commands, ConfigCommands, PointFormat, RunArgs};

/// Report a failed command on stderr and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": chain,
        });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| err.to_string())
        );
    } else {
        eprintln!("{} {err:#}", console::style("Error:").red().bold());
    }
    std::process::exit(1);
}
