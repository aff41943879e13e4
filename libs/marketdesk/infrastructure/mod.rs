//! Infrastructure Layer
//!
//! HTTP and filesystem sources, configuration, logging and shutdown.
//! This layer depends on the domain layer but not on the application layer.

pub mod client;
pub mod config;
pub mod logging;
pub mod shutdown;

pub use client::{
    http_client, ChartRoute, ChartSource, ClientError, ContentError, DirectoryTextSource,
    HttpTextSource, RateSource, RatesApiClient, Source, TextSource, YahooChartClient,
};
pub use config::{ConfigError, DeskConfig};
pub use logging::init_tracing_with_level;
pub use shutdown::ShutdownManager;
