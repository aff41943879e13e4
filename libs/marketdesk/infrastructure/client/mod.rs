//! Network and filesystem sources
//!
//! - `rates`: USD-based rate tables (exchangerate-api, fixer)
//! - `chart`: chart metadata, through a relay or direct
//! - `content`: the site's text resources over HTTP or from a directory

pub mod chart;
pub mod content;
pub mod error;
pub mod rates;
pub mod source;

pub use chart::{ChartRoute, YahooChartClient};
pub use content::{ContentError, DirectoryTextSource, HttpTextSource};
pub use error::{ClientError, Result};
pub use rates::RatesApiClient;
pub use source::{ChartSource, RateSource, Source, TextSource};

use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("market-desk/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client; `timeout` bounds every single request
pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}
