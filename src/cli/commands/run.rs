//! Implementation of the `bifurcate run` command.
//!
//! Acts as the host and consumer around the sweep engine: owns the
//! cancellation token (fired on Ctrl-C), drains the point channel, and writes
//! the sorted points once the sweep has drained.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::output::{
    create_sweep_progress, output, output_stderr, CommandOutput, ProgressBarExt, TableFormatter,
};
use crate::cli::point_writer::PointWriter;
use crate::cli::types::RunArgs;
use crate::domain::models::{SweepConfig, SweepReport};
use crate::domain::ports::Logistic;
use crate::infrastructure::config::{AppConfig, ConfigLoader, DisplayConfig};
use crate::services::{map_to_display, PointCollector, SweepScheduler};

const STDOUT_PATH: &str = "-";

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub report: SweepReport,
    pub output_path: String,
    pub points_written: usize,
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let target = if self.output_path == STDOUT_PATH {
            "stdout"
        } else {
            self.output_path.as_str()
        };
        format!(
            "{}\nWrote {} point(s) to {}",
            TableFormatter::new().format_report(&self.report),
            self.points_written,
            target
        )
    }
}

impl RunArgs {
    /// Where points are written; stdout unless `--output` names a file.
    pub fn destination(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(STDOUT_PATH))
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, sweep: &mut SweepConfig, display: &mut DisplayConfig) {
        if let Some(v) = self.range_start {
            sweep.range_start = v;
        }
        if let Some(v) = self.range_end {
            sweep.range_end = v;
        }
        if let Some(v) = self.step_size {
            sweep.step_size = v;
        }
        if let Some(v) = self.initial_population {
            sweep.initial_population = v;
        }
        if let Some(v) = self.stability_threshold {
            sweep.stability_threshold = v;
        }
        if let Some(v) = self.max_iterations {
            sweep.max_iterations = v;
        }
        if let Some(v) = self.max_concurrency {
            sweep.max_concurrency = v;
        }
        if let Some(mode) = self.mode {
            display.mode = mode;
        }
    }
}

pub async fn execute(args: RunArgs, mut config: AppConfig, json_mode: bool) -> Result<()> {
    args.apply_overrides(&mut config.sweep, &mut config.display);
    ConfigLoader::validate(&config)?;

    let scheduler = Arc::new(
        SweepScheduler::new(config.sweep.clone(), Logistic)
            .context("Failed to build sweep scheduler")?,
    );
    let receiver = scheduler
        .take_point_receiver()
        .context("Point receiver already taken")?;

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, stopping admissions and draining");
                cancel.cancel();
            }
        })
    };

    let sample_count = config.sweep.sample_count();
    let progress = create_sweep_progress(sample_count as u64, !args.no_progress && !json_mode);

    let sweep = {
        let scheduler = Arc::clone(&scheduler);
        let cancel = cancel.clone();
        tokio::spawn(async move { scheduler.run(cancel).await })
    };
    // The channel closes once the sweep task drops the last scheduler handle
    drop(scheduler);

    // Host cancellation only stops admissions; everything admitted is collected
    let collected = PointCollector::new(receiver)
        .collect(&CancellationToken::new(), |_| progress.inc(1))
        .await;

    let report = sweep.await.context("Sweep task panicked")??;
    interrupt.abort();

    if report.cancelled {
        progress.finish_warning(format!("cancelled after {} points", report.emitted));
    } else {
        progress.finish_success("sweep complete");
    }

    let destination = args.destination();
    let to_stdout = destination == Path::new(STDOUT_PATH);

    let mut writer = PointWriter::create(&destination, args.format, args.screen)?;
    for point in &collected.sorted() {
        let screen = args.screen.then(|| {
            map_to_display(
                point.parameter,
                point.value,
                config.display.width,
                config.display.height,
                config.display.mode,
                &config.sweep,
            )
        });
        writer.write(point, screen)?;
    }
    let points_written = writer.finish()?;
    info!(points_written, path = %destination.display(), "points written");

    let output_data = RunOutput {
        report,
        output_path: destination.display().to_string(),
        points_written,
    };
    // Keep stdout clean when it carries the points
    if to_stdout {
        output_stderr(&output_data, json_mode);
    } else {
        output(&output_data, json_mode);
    }
    Ok(())
}
