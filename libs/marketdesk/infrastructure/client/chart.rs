//! Chart API client
//!
//! The chart endpoint is reached either through a CORS relay, which takes
//! the target URL as a query parameter, or directly.

use super::error::{ClientError, Result};
use super::source::{ChartSource, Source};
use crate::domain::ChartMeta;
use crate::infrastructure::config::RelayConfig;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartRoute {
    Relay { name: String, url: String, param: String },
    Direct,
}

impl From<&RelayConfig> for ChartRoute {
    fn from(relay: &RelayConfig) -> Self {
        ChartRoute::Relay {
            name: relay.name.clone(),
            url: relay.url.clone(),
            param: relay.param.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: MetaDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaDto {
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
}

/// Parse a chart response body into its price fields.
///
/// `chartPreviousClose` stands in when `previousClose` is absent.
pub fn parse_chart_meta(body: &str) -> Result<ChartMeta> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| ClientError::DeserializeFailed(e.to_string()))?;

    if let Some(error) = response.chart.error.filter(|e| !e.is_null()) {
        return Err(ClientError::ApiError {
            status: 200,
            message: error.to_string(),
        });
    }

    let meta = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .map(|result| result.meta)
        .ok_or_else(|| ClientError::MissingData("chart.result[0].meta".to_string()))?;

    Ok(ChartMeta {
        regular_market_price: meta.regular_market_price,
        previous_close: meta.previous_close.or(meta.chart_previous_close),
    })
}

/// Chart client bound to one route
pub struct YahooChartClient {
    name: String,
    base_url: String,
    route: ChartRoute,
    client: Client,
}

impl YahooChartClient {
    pub fn new(base_url: impl Into<String>, route: ChartRoute, client: Client) -> Self {
        let name = match &route {
            ChartRoute::Relay { name, .. } => name.clone(),
            ChartRoute::Direct => "direct".to_string(),
        };
        Self {
            name,
            base_url: base_url.into(),
            route,
            client,
        }
    }

    /// URL of the chart itself, before any relay wrapping
    pub fn target_url(&self, symbol: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), symbol)
    }

    /// URL actually requested
    pub fn request_url(&self, symbol: &str) -> Result<Url> {
        let target = self.target_url(symbol);
        match &self.route {
            ChartRoute::Relay { url, param, .. } => {
                Url::parse_with_params(url, &[(param.as_str(), target.as_str())])
                    .map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))
            }
            ChartRoute::Direct => {
                Url::parse(&target).map_err(|e| ClientError::InvalidUrl(format!("{target}: {e}")))
            }
        }
    }
}

impl Source for YahooChartClient {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl ChartSource for YahooChartClient {
    async fn chart_meta(&self, symbol: &str) -> Result<ChartMeta> {
        let url = self.request_url(symbol)?;
        debug!("GET {} ({})", url, self.name);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        parse_chart_meta(&body)
    }
}
