//! Desk configuration
//!
//! Loaded from YAML. Every key has a default, so an empty file (or no file
//! at all, via [`DeskConfig::load_or_default`]) gives the public endpoints
//! the site has always used.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub const ENV_CONTENT_BASE_URL: &str = "CONTENT_BASE_URL";
pub const ENV_CONTENT_DIR: &str = "CONTENT_DIR";
pub const ENV_LOG_LEVEL: &str = "DESK_LOG_LEVEL";

const VALID_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the text resources live. Exactly one of `base_url` and `directory`;
/// when neither is given the `content` directory is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawContentConfig")]
pub struct ContentConfig {
    pub base_url: Option<String>,
    pub directory: Option<PathBuf>,
    pub files: ContentFiles,
}

#[derive(Deserialize)]
struct RawContentConfig {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    directory: Option<PathBuf>,
    #[serde(default)]
    files: ContentFiles,
}

impl From<RawContentConfig> for ContentConfig {
    fn from(raw: RawContentConfig) -> Self {
        let directory = match (&raw.base_url, raw.directory) {
            (None, None) => default_content_dir(),
            (_, directory) => directory,
        };
        Self {
            base_url: raw.base_url,
            directory,
            files: raw.files,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentFiles {
    pub videos: String,
    pub articles: String,
    pub documents: String,
    pub daily_updates: String,
    pub market_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub name: String,
    pub url: String,
}

/// A CORS relay: the target URL is passed in the `param` query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    pub name: String,
    pub url: String,
    #[serde(default = "default_relay_param")]
    pub param: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolConfig {
    pub dollar_index: String,
    pub nifty: String,
    pub bank_nifty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// USD-based rate sources, tried in order
    pub rate_sources: Vec<EndpointConfig>,
    /// Chart endpoint; the symbol is appended as a path segment
    pub chart_base_url: String,
    /// Relays tried before going to `chart_base_url` directly
    pub relays: Vec<RelayConfig>,
    /// Bound on every single HTTP attempt
    pub attempt_timeout_ms: u64,
    /// Race timeout for the dollar index and each equity index
    pub race_timeout_ms: u64,
    pub symbols: SymbolConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_content_dir() -> Option<PathBuf> {
    Some(PathBuf::from("content"))
}

fn default_relay_param() -> String {
    "url".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            directory: default_content_dir(),
            files: ContentFiles::default(),
        }
    }
}

impl Default for ContentFiles {
    fn default() -> Self {
        Self {
            videos: "videos.txt".to_string(),
            articles: "articles.txt".to_string(),
            documents: "documents.txt".to_string(),
            daily_updates: "daily-updates.txt".to_string(),
            market_data: "market-data.txt".to_string(),
        }
    }
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            dollar_index: "DX-Y.NYB".to_string(),
            nifty: "^NSEI".to_string(),
            bank_nifty: "^NSEBANK".to_string(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            rate_sources: vec![
                EndpointConfig {
                    name: "exchangerate-api".to_string(),
                    url: "https://api.exchangerate-api.com/v4/latest/USD".to_string(),
                },
                EndpointConfig {
                    name: "fixer".to_string(),
                    url: "https://api.fixer.io/latest?base=USD&symbols=EUR,GBP,JPY,CHF,INR"
                        .to_string(),
                },
            ],
            chart_base_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
            relays: vec![
                RelayConfig {
                    name: "allorigins".to_string(),
                    url: "https://api.allorigins.win/raw".to_string(),
                    param: default_relay_param(),
                },
                RelayConfig {
                    name: "corsproxy".to_string(),
                    url: "https://corsproxy.io/".to_string(),
                    param: default_relay_param(),
                },
            ],
            attempt_timeout_ms: 3_000,
            race_timeout_ms: 4_000,
            symbols: SymbolConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("site"),
        }
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            content: ContentConfig::default(),
            market: MarketConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl MarketConfig {
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    pub fn race_timeout(&self) -> Duration {
        Duration::from_millis(self.race_timeout_ms)
    }
}

impl DeskConfig {
    /// Load configuration from a YAML file, apply environment overrides
    /// and validate.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&yaml_content)
    }

    /// Like [`load`](Self::load), but a missing file means built-in defaults
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        info!("Config file {} not found, using defaults", path.display());
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml_content: &str) -> Result<Self> {
        // an empty document deserializes as unit, not as an empty mapping
        let mut config: DeskConfig = if yaml_content.trim().is_empty() {
            DeskConfig::default()
        } else {
            serde_yaml::from_str(yaml_content)?
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the environment in practice).
    ///
    /// Setting one content location clears the other.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup(ENV_CONTENT_BASE_URL).filter(|v| !v.trim().is_empty()) {
            info!("Overriding content base URL from environment variable");
            self.content.base_url = Some(base_url);
            self.content.directory = None;
        }

        if let Some(dir) = lookup(ENV_CONTENT_DIR).filter(|v| !v.trim().is_empty()) {
            info!("Overriding content directory from environment variable");
            self.content.directory = Some(PathBuf::from(dir));
            self.content.base_url = None;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !VALID_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                VALID_LEVELS.join(", ")
            )));
        }

        match (&self.content.base_url, &self.content.directory) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::ValidationError(
                    "content.base_url and content.directory are mutually exclusive".to_string(),
                ))
            }
            (None, None) => {
                return Err(ConfigError::ValidationError(
                    "one of content.base_url or content.directory must be set".to_string(),
                ))
            }
            (Some(url), None) if !is_http_url(url) => {
                return Err(ConfigError::ValidationError(format!(
                    "content.base_url must be an http(s) URL, got {url}"
                )))
            }
            _ => {}
        }

        let market = &self.market;
        if market.rate_sources.is_empty() {
            return Err(ConfigError::ValidationError(
                "market.rate_sources cannot be empty".to_string(),
            ));
        }
        if let Some(source) = market.rate_sources.iter().find(|s| !is_http_url(&s.url)) {
            return Err(ConfigError::ValidationError(format!(
                "rate source {} has an invalid url",
                source.name
            )));
        }
        if !is_http_url(&market.chart_base_url) {
            return Err(ConfigError::ValidationError(
                "market.chart_base_url must be an http(s) URL".to_string(),
            ));
        }
        if let Some(relay) = market
            .relays
            .iter()
            .find(|r| !is_http_url(&r.url) || r.param.is_empty())
        {
            return Err(ConfigError::ValidationError(format!(
                "relay {} needs an http(s) url and a query parameter",
                relay.name
            )));
        }
        if market.attempt_timeout_ms == 0 || market.race_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "market timeouts must be greater than 0".to_string(),
            ));
        }
        if market.attempt_timeout_ms > market.race_timeout_ms {
            return Err(ConfigError::ValidationError(
                "market.attempt_timeout_ms cannot exceed market.race_timeout_ms".to_string(),
            ));
        }

        let symbols = &market.symbols;
        if [&symbols.dollar_index, &symbols.nifty, &symbols.bank_nifty]
            .iter()
            .any(|s| s.trim().is_empty())
        {
            return Err(ConfigError::ValidationError(
                "market.symbols entries cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        match (&self.content.base_url, &self.content.directory) {
            (Some(url), _) => info!("  Content: {}", url),
            (None, Some(dir)) => info!("  Content: {}", dir.display()),
            (None, None) => info!("  Content: <unset>"),
        }
        let sources: Vec<&str> = self.market.rate_sources.iter().map(|s| s.name.as_str()).collect();
        let relays: Vec<&str> = self.market.relays.iter().map(|r| r.name.as_str()).collect();
        info!("  Rate sources: {}", sources.join(" -> "));
        info!("  Chart relays: {} -> direct", relays.join(" -> "));
        info!(
            "  Timeouts: {} ms per attempt, {} ms race",
            self.market.attempt_timeout_ms, self.market.race_timeout_ms
        );
        info!("  Output directory: {}", self.output.directory.display());
        info!("  Log level: {}", self.log_level);
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
