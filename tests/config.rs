//! Configuration system tests
//!
//! Tests for config paths and loading/saving the input config.

use std::time::Duration;

use resource_input::config::InputConfig;
use resource_input::config_paths;
use resource_input::runtime::TransportKind;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("resource-input"));
    }
}

#[test]
fn test_config_file_is_yaml() {
    if let Some(file) = config_paths::config_file() {
        assert_eq!(file.extension().and_then(|e| e.to_str()), Some("yaml"));
    }
}

#[test]
fn test_logs_dir_under_config_dir() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(config));
    }
}

// ========================================================================
// InputConfig Tests
// ========================================================================

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = InputConfig {
        blur_debounce_ms: 350,
        history_limit: 5,
        recall_history: false,
        transport: Some(TransportKind::Log),
    };

    config.save_to(&path).unwrap();
    let loaded = InputConfig::load_from(&path).unwrap();

    assert_eq!(loaded, config);
    assert_eq!(loaded.blur_debounce(), Duration::from_millis(350));
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "blur_debounce_ms: 50\n").unwrap();

    let loaded = InputConfig::load_from(&path).unwrap();

    assert_eq!(loaded.blur_debounce_ms, 50);
    assert_eq!(loaded.history_limit, 100);
    assert!(loaded.recall_history);
}

#[test]
fn test_invalid_file_is_an_error_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "history_limit: [not, a, number]\n").unwrap();

    let err = InputConfig::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("config.yaml"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(InputConfig::load_from(&dir.path().join("absent.yaml")).is_err());
}
