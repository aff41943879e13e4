//! Integration test: Configuration utilities
//!
//! Tests the bin_common configuration path lookup and loading the desk
//! configuration from files.

use market_desk::bin_common::{load_config_from_env, ConfigType};
use market_desk::marketdesk::DeskConfig;
use std::env;
use std::io::Write;

#[test]
fn test_desk_config_default() {
    // Clear env var to test default
    env::remove_var("DESK_CONFIG_PATH");

    let config_path = load_config_from_env(ConfigType::Desk);
    assert_eq!(config_path.to_str().unwrap(), "config/desk_config.yaml");
}

#[test]
fn test_custom_config() {
    let custom = ConfigType::Custom("custom/path.yaml".to_string());
    let config_path = load_config_from_env(custom);

    assert_eq!(config_path.to_str().unwrap(), "custom/path.yaml");
}

#[test]
fn test_config_type_env_var_names() {
    assert_eq!(ConfigType::Desk.env_var_name(), "DESK_CONFIG_PATH");
}

#[test]
fn test_config_type_default_paths() {
    assert_eq!(ConfigType::Desk.default_path(), "config/desk_config.yaml");

    let custom = ConfigType::Custom("test.yaml".to_string());
    assert_eq!(custom.default_path(), "test.yaml");
}

#[test]
fn test_shipped_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/desk_config.yaml");
    let config = DeskConfig::load(path).unwrap();

    assert_eq!(config.market.race_timeout_ms, 4000);
    assert_eq!(config.market.attempt_timeout_ms, 3000);
    assert_eq!(config.market.rate_sources.len(), 2);
    assert_eq!(config.content.files.videos, "videos.txt");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "log_level: debug\nmarket:\n  race_timeout_ms: 5000").unwrap();

    let config = DeskConfig::load(file.path()).unwrap();
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.market.race_timeout_ms, 5000);
    assert_eq!(config.market.symbols.nifty, "^NSEI");
    assert_eq!(config.output.directory.to_str(), Some("site"));
}

#[test]
fn test_content_files_only_keeps_default_directory() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "content:\n  files:\n    videos: clips.txt").unwrap();

    let config = DeskConfig::load(file.path()).unwrap();
    assert_eq!(config.content.files.videos, "clips.txt");
    assert_eq!(
        config.content.directory.as_deref().and_then(|d| d.to_str()),
        Some("content")
    );
}

#[test]
fn test_invalid_timeouts_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "market:\n  attempt_timeout_ms: 9000\n  race_timeout_ms: 4000").unwrap();

    assert!(DeskConfig::load(file.path()).is_err());
}
