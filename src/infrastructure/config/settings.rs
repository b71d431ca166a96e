use serde::{Deserialize, Serialize};

use crate::domain::models::SweepConfig;
use crate::infrastructure::logging::LogConfig;
use crate::services::coordinate_mapping::DisplayMode;

/// Top-level configuration for the `bifurcate` binary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    /// Parameter sweep and engine settings
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Display surface used when mapping points to screen coordinates
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,
}

/// Display surface configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DisplayConfig {
    /// Surface width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Surface height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Layout of points on the surface
    #[serde(default)]
    pub mode: DisplayMode,
}

const fn default_width() -> u32 {
    1024
}

const fn default_height() -> u32 {
    768
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            mode: DisplayMode::default(),
        }
    }
}
