//! Table output formatting for CLI commands
//!
//! Renders sweep reports and effective configuration using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use crate::domain::models::SweepReport;
use crate::infrastructure::config::AppConfig;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: console::colors_enabled(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format a sweep report as a two-column table
    pub fn format_report(&self, report: &SweepReport) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        let status = if report.cancelled { "cancelled" } else { "complete" };
        let status_cell = if self.use_colors {
            Cell::new(status).fg(if report.cancelled {
                Color::Yellow
            } else {
                Color::Green
            })
        } else {
            Cell::new(status)
        };

        table.add_row(vec![Cell::new("Run"), Cell::new(report.run_id)]);
        table.add_row(vec![Cell::new("Status"), status_cell]);
        table.add_row(vec![Cell::new("Samples"), Cell::new(report.sample_count)]);
        table.add_row(vec![Cell::new("Admitted"), Cell::new(report.admitted)]);
        table.add_row(vec![Cell::new("Emitted"), Cell::new(report.emitted)]);
        table.add_row(vec![
            Cell::new("Converged"),
            Cell::new(format!(
                "{} ({:.1}%)",
                report.converged,
                report.convergence_rate() * 100.0
            )),
        ]);
        table.add_row(vec![Cell::new("Exhausted"), Cell::new(report.exhausted)]);
        if report.failed > 0 {
            let failed = if self.use_colors {
                Cell::new(report.failed).fg(Color::Red)
            } else {
                Cell::new(report.failed)
            };
            table.add_row(vec![Cell::new("Failed"), failed]);
        }
        table.add_row(vec![
            Cell::new("Peak in flight"),
            Cell::new(report.peak_in_flight),
        ]);
        table.add_row(vec![
            Cell::new("Elapsed"),
            Cell::new(format!("{:.3}s", report.elapsed.as_secs_f64())),
        ]);

        table.to_string()
    }

    /// Format the effective configuration as a key/value table
    pub fn format_config(&self, config: &AppConfig) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("Key").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        let sweep = &config.sweep;
        let rows: [(&str, String); 14] = [
            ("sweep.range_start", sweep.range_start.to_string()),
            ("sweep.range_end", sweep.range_end.to_string()),
            ("sweep.step_size", sweep.step_size.to_string()),
            ("sweep.initial_population", sweep.initial_population.to_string()),
            ("sweep.stability_threshold", sweep.stability_threshold.to_string()),
            ("sweep.max_iterations", sweep.max_iterations.to_string()),
            ("sweep.max_concurrency", sweep.max_concurrency.to_string()),
            ("sweep.channel_capacity", sweep.channel_capacity.to_string()),
            ("display.width", config.display.width.to_string()),
            ("display.height", config.display.height.to_string()),
            ("display.mode", config.display.mode.to_string()),
            ("logging.level", config.logging.level.clone()),
            ("logging.format", format!("{:?}", config.logging.format).to_lowercase()),
            (
                "logging.log_dir",
                config
                    .logging
                    .log_dir
                    .as_ref()
                    .map_or_else(|| "-".to_string(), |dir| dir.display().to_string()),
            ),
        ];

        for (key, value) in rows {
            let key_cell = if self.use_colors {
                Cell::new(key).fg(Color::Cyan)
            } else {
                Cell::new(key)
            };
            table.add_row(vec![key_cell, Cell::new(value)]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        // Use UTF-8 preset for nice borders
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}
