//! Print one market snapshot
//!
//! ```text
//! market_snapshot           # terminal table
//! market_snapshot --html    # daily-market-container + update stamp fragments
//! market_snapshot --json    # serialized snapshot
//! ```

use anyhow::{Context, Result};
use market_desk::bin_common::{
    load_config_from_env, parse_args, BinaryRunner, ConfigType, OutputFormat, RunConfig,
};
use market_desk::marketdesk::application::{
    render, text_source_from_config, MarketSnapshotAggregator, MarketSources,
};
use market_desk::marketdesk::{http_client, init_tracing_with_level, DeskConfig, ShutdownManager};
use std::sync::Arc;

struct SnapshotApp {
    run_config: RunConfig,
    aggregator: MarketSnapshotAggregator,
    format: OutputFormat,
    shutdown: Arc<ShutdownManager>,
}

impl SnapshotApp {
    fn new(config: &DeskConfig, format: OutputFormat) -> Result<Self> {
        let client = http_client(config.market.attempt_timeout())?;
        let text = text_source_from_config(&config.content, client.clone())?;
        let run_config = RunConfig::new("Market Snapshot")
            .with_detail(format!("Commentary from: {}", text.location()))
            .with_detail(format!("Output: {:?}", format));

        let sources = MarketSources::from_config(config, client, text);
        let shutdown = Arc::new(ShutdownManager::new());
        shutdown.spawn_signal_handler();

        Ok(Self {
            run_config,
            aggregator: MarketSnapshotAggregator::from_config(config, sources),
            format,
            shutdown,
        })
    }
}

impl BinaryRunner for SnapshotApp {
    async fn run(&mut self) -> Result<()> {
        let snapshot = self.aggregator.snapshot().await;

        let output = match self.format {
            OutputFormat::Text => render::snapshot_table(&snapshot),
            OutputFormat::Html => format!(
                "{}\n{}",
                render::market_panel(&snapshot),
                render::update_stamp(&snapshot)
            ),
            OutputFormat::Json => {
                render::snapshot_json(&snapshot).context("Failed to serialize snapshot")?
            }
        };

        println!("{}", output);
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

    let format = OutputFormat::from_args(&parse_args());
    let mut app = SnapshotApp::new(&config, format)?;
    app.execute().await
}
