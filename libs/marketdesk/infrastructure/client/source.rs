//! Source traits
//!
//! The aggregator and the content loader only see these traits, so tests
//! swap the HTTP clients for in-memory fakes.

use super::content::ContentError;
use super::error::Result;
use crate::domain::{ChartMeta, UsdRates};
use async_trait::async_trait;

/// Anything that can be named in logs and fallback chains
pub trait Source: Send + Sync {
    fn name(&self) -> &str;
}

/// A USD-based currency rate table
#[async_trait]
pub trait RateSource: Source {
    async fn latest_usd_rates(&self) -> Result<UsdRates>;
}

/// Chart price metadata for a ticker symbol
#[async_trait]
pub trait ChartSource: Source {
    async fn chart_meta(&self, symbol: &str) -> Result<ChartMeta>;
}

/// Raw text resources by file name
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Where resources come from, for logs
    fn location(&self) -> String;

    async fn fetch_text(&self, name: &str) -> std::result::Result<String, ContentError>;
}
