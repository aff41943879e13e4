//! USD-based currency rate APIs
//!
//! Both supported APIs answer with a `rates` object keyed by currency code.
//! fixer additionally reports `success: false` plus an `error` object
//! instead of an HTTP error status.

use super::error::{ClientError, Result};
use super::source::{RateSource, Source};
use crate::domain::UsdRates;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    rates: Option<HashMap<String, f64>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Parse a rates response body
pub fn parse_rates(body: &str) -> Result<UsdRates> {
    let response: RatesResponse =
        serde_json::from_str(body).map_err(|e| ClientError::DeserializeFailed(e.to_string()))?;

    if response.success == Some(false) || response.error.is_some() {
        let message = response
            .error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "success=false".to_string());
        return Err(ClientError::ApiError {
            status: 200,
            message,
        });
    }

    match response.rates {
        Some(rates) if !rates.is_empty() => Ok(UsdRates::new(rates)),
        _ => Err(ClientError::MissingData("rates".to_string())),
    }
}

/// A rate API at a fixed URL
pub struct RatesApiClient {
    name: String,
    url: String,
    client: Client,
}

impl RatesApiClient {
    pub fn new(name: impl Into<String>, url: impl Into<String>, client: Client) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client,
        }
    }
}

impl Source for RatesApiClient {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl RateSource for RatesApiClient {
    async fn latest_usd_rates(&self) -> Result<UsdRates> {
        debug!("GET {} ({})", self.url, self.name);

        let response = self.client.get(&self.url).send().await?;
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
        parse_rates(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchangerate_api_shape() {
        let body = r#"{"base":"USD","date":"2025-10-13","rates":{"EUR":0.92,"INR":83.12}}"#;
        let rates = parse_rates(body).unwrap();
        assert_eq!(rates.rate("INR").unwrap(), 83.12);
    }

    #[test]
    fn test_fixer_failure_is_an_error() {
        let body = r#"{"success":false,"error":{"code":101,"type":"missing_access_key"}}"#;
        match parse_rates(body) {
            Err(ClientError::ApiError { message, .. }) => {
                assert!(message.contains("missing_access_key"))
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_rates() {
        assert!(matches!(
            parse_rates(r#"{"success":true,"rates":{}}"#),
            Err(ClientError::MissingData(_))
        ));
        assert!(matches!(
            parse_rates("<html>"),
            Err(ClientError::DeserializeFailed(_))
        ));
    }
}
