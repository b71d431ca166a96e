//! Implementation of the `bifurcate config` commands.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::cli::types::ConfigCommands;
use crate::infrastructure::config::{AppConfig, ConfigLoader};

#[derive(Debug, Serialize)]
pub struct ConfigShowOutput {
    #[serde(flatten)]
    pub config: AppConfig,
    pub sample_count: usize,
}

impl CommandOutput for ConfigShowOutput {
    fn to_human(&self) -> String {
        format!(
            "{}\n{} parameter sample(s) per sweep",
            TableFormatter::new().format_config(&self.config),
            self.sample_count
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigValidateOutput {
    pub valid: bool,
    pub message: String,
}

impl CommandOutput for ConfigValidateOutput {
    fn to_human(&self) -> String {
        if self.valid {
            format!("{} {}", console::style("✓").green(), self.message)
        } else {
            format!("{} {}", console::style("✗").red(), self.message)
        }
    }
}

pub fn execute(command: ConfigCommands, config: AppConfig, json_mode: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let sample_count = config.sweep.sample_count();
            output(&ConfigShowOutput { config, sample_count }, json_mode);
            Ok(())
        }
        ConfigCommands::Validate => {
            let result = validate(&config);
            output(&result, json_mode);
            if result.valid {
                Ok(())
            } else {
                anyhow::bail!("{}", result.message)
            }
        }
    }
}

fn validate(config: &AppConfig) -> ConfigValidateOutput {
    match ConfigLoader::validate(config) {
        Ok(()) => ConfigValidateOutput {
            valid: true,
            message: "Configuration is valid".to_string(),
        },
        Err(err) => ConfigValidateOutput {
            valid: false,
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_error_message() {
        let mut config = AppConfig::default();
        config.sweep.max_concurrency = 0;
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result.message.contains("max_concurrency"));
    }

    #[test]
    fn test_validate_default_is_valid() {
        assert!(validate(&AppConfig::default()).valid);
    }

    #[test]
    fn test_show_json_includes_sections() {
        let out = ConfigShowOutput {
            config: AppConfig::default(),
            sample_count: 4000,
        };
        let json = out.to_json();
        assert_eq!(json["sweep"]["max_concurrency"], 16);
        assert_eq!(json["display"]["mode"], "linear");
        assert_eq!(json["sample_count"], 4000);
    }
}
