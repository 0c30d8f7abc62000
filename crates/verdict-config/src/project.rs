//! Project Configuration (verdict.toml)
//!
//! Handles project-level configuration stored in `verdict.toml` at the project root.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration from verdict.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Report file settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,

    /// Console output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// Report file settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Directory for report files, relative to the project root (default: "test-results")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_dir: Option<PathBuf>,

    /// Write a report file after each run (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save: Option<bool>,

    /// Report file name prefix (default: "test_results")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Console output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Colorize PASS/FAIL markers (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Print one character per test instead of one line (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet: Option<bool>,
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(report) = &self.report {
            if let Some(dir) = &report.results_dir {
                if dir.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "report.results_dir".to_string(),
                        reason: "directory cannot be empty".to_string(),
                    });
                }
            }

            if let Some(prefix) = &report.prefix {
                validate_prefix(prefix)?;
            }
        }

        Ok(())
    }

    /// Mutable report section, created on first use
    pub fn report_mut(&mut self) -> &mut ReportConfig {
        self.report.get_or_insert_with(ReportConfig::default)
    }

    /// Mutable output section, created on first use
    pub fn output_mut(&mut self) -> &mut OutputConfig {
        self.output.get_or_insert_with(OutputConfig::default)
    }
}

/// Report file prefixes end up in a file name: no separators, not empty
fn validate_prefix(prefix: &str) -> ConfigResult<()> {
    if prefix.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "report.prefix".to_string(),
            reason: "prefix cannot be empty".to_string(),
        });
    }
    if prefix.contains(['/', '\\']) {
        return Err(ConfigError::InvalidValue {
            field: "report.prefix".to_string(),
            reason: format!("'{}' must not contain path separators", prefix),
        });
    }
    Ok(())
}
