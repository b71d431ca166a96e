//! Mapping of sweep points onto a display surface.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use crate::domain::models::SweepConfig;

/// How points are laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Parameter along x, value along y.
    #[default]
    Linear,
    /// Parameter as angle over a full turn, value as radius from the centre.
    Polar,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Polar => f.write_str("polar"),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "polar" | "circle" => Ok(Self::Polar),
            other => Err(format!("Invalid display mode: {other}. Must be one of: linear, polar")),
        }
    }
}

/// Position on the display surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

/// Map a `(parameter, value)` pair onto a `width x height` surface.
pub fn map_to_display(
    parameter: f64,
    value: f64,
    width: u32,
    height: u32,
    mode: DisplayMode,
    config: &SweepConfig,
) -> ScreenPosition {
    let width = f64::from(width);
    let height = f64::from(height);
    let fraction = (parameter - config.range_start) / config.span();

    match mode {
        DisplayMode::Linear => ScreenPosition {
            x: fraction * width,
            y: value * height,
        },
        DisplayMode::Polar => {
            let theta = fraction * TAU;
            let radius = value * 0.5 * height;
            ScreenPosition {
                x: radius.mul_add(theta.sin(), 0.5 * width),
                y: radius.mul_add(theta.cos(), 0.5 * height),
            }
        }
    }
}
