//! CLI output formatting module
//!
//! Human/JSON command output, summary tables and progress bars.

pub mod progress;
pub mod table;

use serde::Serialize;

pub use progress::{create_sweep_progress, ProgressBarExt};
pub use table::TableFormatter;

/// A command result that can be shown to a person or emitted as JSON.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Render a command result in the selected mode.
pub fn render<T: CommandOutput>(result: &T, json_mode: bool) -> String {
    if json_mode {
        serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
    } else {
        result.to_human()
    }
}

/// Print a command result on stdout in the selected mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    println!("{}", render(result, json_mode));
}

/// Print a command result on stderr, for commands whose stdout carries data.
pub fn output_stderr<T: CommandOutput>(result: &T, json_mode: bool) {
    eprintln!("{}", render(result, json_mode));
}
