//! Serialization of collected points to CSV or newline-delimited JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::types::PointFormat;
use crate::domain::models::Point;
use crate::services::coordinate_mapping::ScreenPosition;

#[derive(Serialize)]
struct PointRecord<'a> {
    #[serde(flatten)]
    point: &'a Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    screen: Option<ScreenPosition>,
}

/// Writes points in a fixed format, optionally with screen coordinates.
pub struct PointWriter<W: Write> {
    out: W,
    format: PointFormat,
    with_screen: bool,
    written: usize,
}

impl PointWriter<BufWriter<Box<dyn Write>>> {
    /// Open `path` for writing; `-` selects stdout.
    pub fn create(path: &Path, format: PointFormat, with_screen: bool) -> Result<Self> {
        let sink: Box<dyn Write> = if path == Path::new("-") {
            Box::new(io::stdout())
        } else {
            Box::new(
                File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?,
            )
        };
        Self::new(BufWriter::new(sink), format, with_screen)
    }
}

impl<W: Write> PointWriter<W> {
    pub fn new(mut out: W, format: PointFormat, with_screen: bool) -> Result<Self> {
        if format == PointFormat::Csv {
            let header = if with_screen {
                "parameter,value,iterations,outcome,screen_x,screen_y"
            } else {
                "parameter,value,iterations,outcome"
            };
            writeln!(out, "{header}").context("Failed to write CSV header")?;
        }

        Ok(Self {
            out,
            format,
            with_screen,
            written: 0,
        })
    }

    pub fn write(&mut self, point: &Point, screen: Option<ScreenPosition>) -> Result<()> {
        let screen = if self.with_screen { screen } else { None };

        match self.format {
            PointFormat::Csv => {
                write!(
                    self.out,
                    "{},{},{},{}",
                    point.parameter,
                    point.value,
                    point.iterations,
                    point.outcome.as_str()
                )?;
                if let Some(pos) = screen {
                    write!(self.out, ",{},{}", pos.x, pos.y)?;
                }
                writeln!(self.out)?;
            }
            PointFormat::Ndjson => {
                serde_json::to_writer(&mut self.out, &PointRecord { point, screen })
                    .context("Failed to serialize point")?;
                writeln!(self.out)?;
            }
        }

        self.written += 1;
        Ok(())
    }

    /// Flush and return the number of points written.
    pub fn finish(mut self) -> Result<usize> {
        self.out.flush().context("Failed to flush point output")?;
        Ok(self.written)
    }
}
