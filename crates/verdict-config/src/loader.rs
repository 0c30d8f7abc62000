//! Configuration Loader
//!
//! Handles loading configuration and applying environment overrides with proper precedence.

use crate::project::ProjectConfig;
use crate::{ConfigError, ConfigResult, CONFIG_FILE_NAME};
use std::env;
use std::path::{Path, PathBuf};

/// Default directory for report files
pub const DEFAULT_RESULTS_DIR: &str = "test-results";

/// Default report file name prefix
pub const DEFAULT_REPORT_PREFIX: &str = "test_results";

/// Configuration loader
///
/// Loads configuration with the following precedence:
/// 1. Project config (./verdict.toml) - overrides defaults
/// 2. Environment variables (VERDICT_*, NO_COLOR) - overrides project
/// 3. CLI flags - highest priority (handled by caller)
#[derive(Debug, Default)]
pub struct ConfigLoader;

/// Merged configuration result
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration with environment overrides applied
    pub project: ProjectConfig,

    /// Project root directory (where verdict.toml was found)
    pub project_root: Option<PathBuf>,

    /// Directory relative paths are resolved against
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find verdict.toml. Without one, the
    /// defaults apply and paths resolve against `start_dir`.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;
        let project = self.apply_env_overrides(project_config)?;
        let base_dir = project_root
            .clone()
            .unwrap_or_else(|| start_dir.to_path_buf());

        Ok(Config {
            project,
            project_root,
            base_dir,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<Config> {
        let project = ProjectConfig::load_from_file(config_path)?;
        let project = self.apply_env_overrides(project)?;
        let project_root = config_path.parent().map(|p| p.to_path_buf());
        let base_dir = project_root.clone().unwrap_or_default();

        Ok(Config {
            project,
            project_root,
            base_dir,
        })
    }

    /// Find project configuration by walking up directory tree
    ///
    /// Returns (project_root, project_config)
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                let project_config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, ProjectConfig::default())),
            }
        }
    }

    /// Apply environment variable overrides to project config
    ///
    /// Recognised variables:
    /// - VERDICT_RESULTS_DIR=<path>
    /// - VERDICT_SAVE_REPORT=<bool>
    /// - VERDICT_QUIET=<bool>
    /// - VERDICT_NO_COLOR or NO_COLOR (any non-empty value disables color)
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if let Ok(dir) = env::var("VERDICT_RESULTS_DIR") {
            if !dir.is_empty() {
                config.report_mut().results_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(save) = env::var("VERDICT_SAVE_REPORT") {
            config.report_mut().save = Some(parse_flag("VERDICT_SAVE_REPORT", &save)?);
        }

        if let Ok(quiet) = env::var("VERDICT_QUIET") {
            config.output_mut().quiet = Some(parse_flag("VERDICT_QUIET", &quiet)?);
        }

        if is_set("VERDICT_NO_COLOR") || is_set("NO_COLOR") {
            config.output_mut().color = Some(false);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Present with a non-empty value, per the NO_COLOR convention
fn is_set(var: &str) -> bool {
    env::var_os(var).is_some_and(|value| !value.is_empty())
}

/// Parse a boolean environment value
fn parse_flag(field: &str, value: &str) -> ConfigResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a boolean, got '{}'", value),
        }),
    }
}

impl Config {
    /// Project root directory, if a verdict.toml was found
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if this is a project (has verdict.toml)
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Directory report files are written to
    ///
    /// Relative settings resolve against the project root, or the start
    /// directory when there is no project.
    pub fn results_dir(&self) -> PathBuf {
        let dir = self
            .project
            .report
            .as_ref()
            .and_then(|r| r.results_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR));
        self.base_dir.join(dir)
    }

    /// Whether a report file should be written (default: true)
    pub fn save_report(&self) -> bool {
        self.project
            .report
            .as_ref()
            .and_then(|r| r.save)
            .unwrap_or(true)
    }

    /// Report file name prefix
    pub fn report_prefix(&self) -> &str {
        self.project
            .report
            .as_ref()
            .and_then(|r| r.prefix.as_deref())
            .unwrap_or(DEFAULT_REPORT_PREFIX)
    }

    /// Whether console output is colored (default: true)
    pub fn color(&self) -> bool {
        self.project
            .output
            .as_ref()
            .and_then(|o| o.color)
            .unwrap_or(true)
    }

    /// Whether console output is condensed (default: false)
    pub fn quiet(&self) -> bool {
        self.project
            .output
            .as_ref()
            .and_then(|o| o.quiet)
            .unwrap_or(false)
    }
}
