//! CLI utilities for binaries
//!
//! Handles configuration path lookup and argument parsing
//! for all binary executables.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Desk configuration (desk_config.yaml)
    Desk,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Desk => "config/desk_config.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::Desk => "DESK_CONFIG_PATH",
            ConfigType::Custom(_) => "DESK_CONFIG_PATH",
        }
    }
}

/// Load configuration path from environment or use default
///
/// A custom path always wins over the environment.
///
/// # Examples
/// ```
/// use market_desk::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Desk);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    if let ConfigType::Custom(path) = &config_type {
        return PathBuf::from(path);
    }
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// How `market_snapshot` prints its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl OutputFormat {
    /// `--html` or `--json`; anything else means text. The last flag wins.
    pub fn from_args(args: &[String]) -> Self {
        args.iter()
            .filter_map(|arg| match arg.as_str() {
                "--html" => Some(OutputFormat::Html),
                "--json" => Some(OutputFormat::Json),
                "--text" => Some(OutputFormat::Text),
                _ => None,
            })
            .last()
            .unwrap_or_default()
    }
}
