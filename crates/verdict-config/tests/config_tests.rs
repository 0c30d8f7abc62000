//! Configuration loading and precedence tests

use pretty_assertions::assert_eq;
use rstest::rstest;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use verdict_config::{ConfigError, ConfigLoader, ProjectConfig, CONFIG_FILE_NAME};

fn create_config_file(dir: &Path, content: &str) -> PathBuf {
    let config_path = dir.join(CONFIG_FILE_NAME);
    fs::write(&config_path, content).unwrap();
    config_path
}

fn clear_env() {
    for var in [
        "VERDICT_RESULTS_DIR",
        "VERDICT_SAVE_REPORT",
        "VERDICT_QUIET",
        "VERDICT_NO_COLOR",
        "NO_COLOR",
    ] {
        env::remove_var(var);
    }
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
#[serial]
fn test_load_with_empty_config() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "");

    let config = ConfigLoader::new().load_from_directory(temp_dir.path()).unwrap();

    // Empty config is valid (all fields optional)
    assert!(config.is_project());
    assert!(config.save_report());
}

#[test]
#[serial]
fn test_load_from_deep_subdirectory() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[report]
prefix = "ci"
"#,
    );
    let deep = temp_dir.path().join("a").join("b").join("c");
    fs::create_dir_all(&deep).unwrap();

    let config = ConfigLoader::new().load_from_directory(&deep).unwrap();

    assert_eq!(config.project_root(), Some(temp_dir.path()));
    assert_eq!(config.report_prefix(), "ci");
}

#[test]
#[serial]
fn test_load_from_specific_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(
        temp_dir.path(),
        r#"
[output]
color = false
"#,
    );

    let config = ConfigLoader::new().load_from_file(&path).unwrap();

    assert!(!config.color());
    assert_eq!(config.results_dir(), temp_dir.path().join("test-results"));
}

#[test]
fn test_missing_specific_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = ProjectConfig::load_from_file(&temp_dir.path().join(CONFIG_FILE_NAME));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

// ============================================================================
// Invalid Config Tests
// ============================================================================

#[rstest]
#[case::broken_toml("[report\nsave = ")]
#[case::unknown_section("[coverage]\nenabled = true")]
#[case::unknown_field("[report]\nformat = \"xml\"")]
#[case::empty_dir("[report]\nresults_dir = \"\"")]
#[case::prefix_with_separator("[report]\nprefix = \"a/b\"")]
#[case::wrong_type("[output]\ncolor = \"yes\"")]
#[serial]
fn test_invalid_config_rejected(#[case] content: &str) {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), content);

    let result = ConfigLoader::new().load_from_directory(temp_dir.path());
    assert!(result.is_err(), "accepted invalid config: {}", content);
}

// ============================================================================
// Precedence Tests
// ============================================================================

#[test]
#[serial]
fn test_env_results_dir_overrides_project() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[report]
results_dir = "from-file"
"#,
    );

    env::set_var("VERDICT_RESULTS_DIR", "from-env");
    let config = ConfigLoader::new().load_from_directory(temp_dir.path()).unwrap();
    clear_env();

    assert_eq!(config.results_dir(), temp_dir.path().join("from-env"));
}

#[test]
#[serial]
fn test_absolute_results_dir_is_kept() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();

    env::set_var("VERDICT_RESULTS_DIR", elsewhere.path());
    let config = ConfigLoader::new().load_from_directory(temp_dir.path()).unwrap();
    clear_env();

    assert_eq!(config.results_dir(), elsewhere.path());
}

#[test]
#[serial]
fn test_verdict_no_color() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    env::set_var("VERDICT_NO_COLOR", "1");
    let config = ConfigLoader::new().load_from_directory(temp_dir.path()).unwrap();
    clear_env();

    assert!(!config.color());
}
