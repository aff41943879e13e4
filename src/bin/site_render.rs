//! Render every page fragment into a directory
//!
//! ```text
//! site_render              # output.directory from the config
//! site_render public/frag  # explicit output directory
//! ```

use anyhow::{Context, Result};
use market_desk::bin_common::{
    load_config_from_env, parse_args, BinaryRunner, ConfigType, RunConfig,
};
use market_desk::marketdesk::application::{
    text_source_from_config, ContentLoader, MarketSnapshotAggregator, MarketSources, SiteBuilder,
};
use market_desk::marketdesk::{http_client, init_tracing_with_level, DeskConfig, ShutdownManager};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

struct SiteApp {
    run_config: RunConfig,
    builder: SiteBuilder,
    shutdown: Arc<ShutdownManager>,
}

impl SiteApp {
    fn new(config: &DeskConfig, output_dir: PathBuf) -> Result<Self> {
        let client = http_client(config.market.attempt_timeout())?;
        let text = text_source_from_config(&config.content, client.clone())?;
        let run_config = RunConfig::new("Site Render")
            .with_detail(format!("Content from: {}", text.location()))
            .with_detail(format!("Output directory: {}", output_dir.display()));

        let loader = ContentLoader::new(Arc::clone(&text), config.content.files.clone());
        let sources = MarketSources::from_config(config, client, text);
        let aggregator = MarketSnapshotAggregator::from_config(config, sources);

        let shutdown = Arc::new(ShutdownManager::new());
        shutdown.spawn_signal_handler();

        Ok(Self {
            run_config,
            builder: SiteBuilder::new(loader, aggregator, output_dir),
            shutdown,
        })
    }
}

impl BinaryRunner for SiteApp {
    async fn run(&mut self) -> Result<()> {
        let report = self.builder.build().await?;
        info!(
            "Wrote {} fragments to {}",
            report.written.len(),
            self.builder.output_dir().display()
        );

        for (panel, reason) in &report.failed {
            warn!("{} not written: {}", panel, reason);
        }
        if !report.is_complete() {
            anyhow::bail!("{} fragment(s) could not be written", report.failed.len());
        }
        Ok(())
    }

    fn config(&self) -> &RunConfig {
        &self.run_config
    }

    fn shutdown(&self) -> Arc<ShutdownManager> {
        Arc::clone(&self.shutdown)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load config first (before logging is initialized)
    let config_path = load_config_from_env(ConfigType::Desk);
    let config = DeskConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    // Initialize logging with configured level
    init_tracing_with_level(&config.log_level);
    config.log();

    let output_dir = parse_args()
        .into_iter()
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.output.directory.clone());

    let mut app = SiteApp::new(&config, output_dir)?;
    app.execute().await
}
