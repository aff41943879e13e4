//! Binary runner utilities
//!
//! Provides a standardized way to run binaries with proper
//! logging, banners and graceful shutdown.

use marketdesk::ShutdownManager;
use std::sync::Arc;
use tracing::info;

/// Configuration for running a binary application
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Name of the binary (for logging)
    pub name: String,
    /// Extra banner lines, e.g. where content comes from
    pub details: Vec<String>,
}

impl RunConfig {
    /// Create a new run configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: Vec::new(),
        }
    }

    /// Add a banner line
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}

/// Trait for binary applications
///
/// `run` does one complete pass; `execute` wraps it with banners and
/// abandons it on Ctrl+C.
pub trait BinaryRunner {
    /// Run the application once
    async fn run(&mut self) -> anyhow::Result<()>;

    /// Get the run configuration
    fn config(&self) -> &RunConfig;

    /// Shutdown manager watching for Ctrl+C
    fn shutdown(&self) -> Arc<ShutdownManager>;

    /// Print startup banner
    fn print_banner(&self) {
        let config = self.config();
        info!("");
        info!("========================================");
        info!("Starting {}", config.name);
        for detail in &config.details {
            info!("{}", detail);
        }
        info!("Press Ctrl+C to stop");
        info!("========================================");
        info!("");
    }

    /// Print shutdown banner
    fn print_shutdown(&self, stats: Option<&str>) {
        let config = self.config();
        info!("");
        info!("========================================");
        info!("{} stopped gracefully", config.name);
        if let Some(stats) = stats {
            info!("{}", stats);
        }
        info!("========================================");
    }

    /// Execute the binary with proper initialization and cleanup
    async fn execute(&mut self) -> anyhow::Result<()> {
        self.print_banner();
        let shutdown = self.shutdown();
        let outcome = shutdown.run_until_stopped(self.run()).await;
        let interrupted = outcome.is_none();
        self.print_shutdown(interrupted.then_some("Run interrupted by Ctrl+C"));
        outcome.unwrap_or(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_builder() {
        let config = RunConfig::new("test-binary")
            .with_detail("Content: content")
            .with_detail("Output: site");

        assert_eq!(config.name, "test-binary");
        assert_eq!(config.details, vec!["Content: content", "Output: site"]);
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::new("default");
        assert!(config.details.is_empty());
    }
}
