//! Market snapshot aggregation
//!
//! Two waves, each settling all of its fetches before the next starts:
//!
//! 1. FX rates (majors and USD/INR) and the market-data commentary file
//! 2. Dollar index, Nifty 50 and Bank Nifty, each racing a timeout
//!
//! A failure in one fetch never aborts the others. The dollar index falls
//! back to an approximation from the wave 1 rates; the equity indices fall
//! back to the market-data file. The file is fetched once more at most,
//! when wave 1 missed it or it had no technical pulse.

use super::dollar_index::approximate_quote;
use super::fallback::{first_success, ChainError, ChainSuccess};
use crate::domain::parsing::market_data::{BANK_NIFTY, NIFTY_50};
use crate::domain::parsing::{parse_market_data, MarketDataFile, ParseError};
use crate::domain::{
    format_indian, FxMajors, FxPanel, MarketSnapshot, Quote, QuoteOrigin, QuoteState,
    TransitionError, UsdRates,
};
use crate::infrastructure::client::{
    ChartRoute, ChartSource, ClientError, ContentError, RateSource, RatesApiClient, TextSource,
    YahooChartClient,
};
use crate::infrastructure::config::{DeskConfig, SymbolConfig};
use chrono::{FixedOffset, Offset, Utc};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// India Standard Time, UTC+05:30
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ContentError),

    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

/// Every source the aggregator talks to
pub struct MarketSources {
    /// USD-based rate sources in priority order
    pub rates: Vec<Arc<dyn RateSource>>,
    /// Chart routes in priority order (relays, then direct)
    pub charts: Vec<Arc<dyn ChartSource>>,
    /// Where the market-data commentary file lives
    pub text: Arc<dyn TextSource>,
}

impl MarketSources {
    /// HTTP sources for the configured endpoints
    pub fn from_config(config: &DeskConfig, client: Client, text: Arc<dyn TextSource>) -> Self {
        let market = &config.market;

        let rates = market
            .rate_sources
            .iter()
            .map(|s| {
                Arc::new(RatesApiClient::new(&s.name, &s.url, client.clone())) as Arc<dyn RateSource>
            })
            .collect();

        let charts = market
            .relays
            .iter()
            .map(ChartRoute::from)
            .chain(std::iter::once(ChartRoute::Direct))
            .map(|route| {
                Arc::new(YahooChartClient::new(&market.chart_base_url, route, client.clone()))
                    as Arc<dyn ChartSource>
            })
            .collect();

        Self {
            rates,
            charts,
            text,
        }
    }
}

/// Log and drop a rejected state transition
fn apply(label: &str, result: Result<(), TransitionError>) {
    if let Err(e) = result {
        error!("{}: {}", label, e);
    }
}

pub(crate) fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

pub struct MarketSnapshotAggregator {
    sources: MarketSources,
    race_timeout: Duration,
    symbols: SymbolConfig,
    market_data_file: String,
}

impl MarketSnapshotAggregator {
    pub fn new(
        sources: MarketSources,
        race_timeout: Duration,
        symbols: SymbolConfig,
        market_data_file: impl Into<String>,
    ) -> Self {
        Self {
            sources,
            race_timeout,
            symbols,
            market_data_file: market_data_file.into(),
        }
    }

    pub fn from_config(config: &DeskConfig, sources: MarketSources) -> Self {
        Self::new(
            sources,
            config.market.race_timeout(),
            config.market.symbols.clone(),
            config.content.files.market_data.clone(),
        )
    }

    /// Fetch everything and merge whatever succeeded
    pub async fn snapshot(&self) -> MarketSnapshot {
        info!("Loading live market data");

        let mut usdinr = QuoteState::default();
        let mut dollar_index = QuoteState::default();
        let mut nifty = QuoteState::default();
        let mut bank_nifty = QuoteState::default();
        apply("USDINR", usdinr.start());

        // Wave 1
        let (rates, market_data) = tokio::join!(self.fetch_rates(), self.fetch_market_data());

        let fx_majors = fx_panel(&rates);
        settle_usdinr(&mut usdinr, &rates);

        let mut market_file = match market_data {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("Market data file unavailable: {}", e);
                None
            }
        };

        // Wave 2
        apply("Dollar Index", dollar_index.start());
        apply(NIFTY_50, nifty.start());
        apply(BANK_NIFTY, bank_nifty.start());

        let (dxy_result, nifty_result, bank_result) = tokio::join!(
            self.race_chart("Dollar Index", &self.symbols.dollar_index),
            self.race_chart(NIFTY_50, &self.symbols.nifty),
            self.race_chart(BANK_NIFTY, &self.symbols.bank_nifty),
        );

        match dxy_result {
            Ok(success) => {
                let (current, previous) = success.value;
                let quote = Quote::from_move(format!("{:.2}", current), current, previous);
                apply(
                    "Dollar Index",
                    dollar_index.succeed(quote, QuoteOrigin::Network(success.source)),
                );
            }
            Err(reason) => {
                apply("Dollar Index", dollar_index.fall_back(&reason));
                settle_dollar_index_fallback(&mut dollar_index, &rates, &reason);
            }
        }

        let index_results = [
            (NIFTY_50, &mut nifty, nifty_result),
            (BANK_NIFTY, &mut bank_nifty, bank_result),
        ];

        let mut refetched = false;
        for (name, state, result) in index_results {
            match result {
                Ok(success) => {
                    let (current, previous) = success.value;
                    let quote = Quote::from_move(format_indian(current), current, previous);
                    apply(name, state.succeed(quote, QuoteOrigin::Network(success.source)));
                }
                Err(reason) => {
                    apply(name, state.fall_back(&reason));

                    if market_file.is_none() && !refetched {
                        refetched = true;
                        info!("Fetching market data file again for index fallback");
                        market_file = self.fetch_market_data().await.ok();
                    }

                    match market_file.as_ref().and_then(|file| file.index(name)) {
                        Some(quote) => {
                            info!("{} taken from market data file", name);
                            apply(name, state.succeed(quote.clone(), QuoteOrigin::LocalFile));
                        }
                        None => {
                            error!("{} unavailable: {}", name, reason);
                            apply(
                                name,
                                state.fail(format!("{reason}; no {name} row in market data file")),
                            );
                        }
                    }
                }
            }
        }

        let lacks_technical = !market_file
            .as_ref()
            .is_some_and(|file| file.comments.has_technical());
        if lacks_technical && !refetched {
            info!("Fetching market data file again for technical pulse");
            if let Ok(file) = self.fetch_market_data().await {
                market_file = Some(file);
            }
        }

        let (comments, last_updated) = match market_file {
            Some(file) => (Some(file.comments), file.last_updated),
            None => (None, None),
        };

        let snapshot = MarketSnapshot {
            fx_majors,
            dollar_index,
            usdinr,
            nifty,
            bank_nifty,
            comments,
            last_updated,
            captured_at: Utc::now().with_timezone(&ist()),
        };

        info!("Market snapshot ready at {}", snapshot.captured_label());
        snapshot
    }

    async fn fetch_rates(&self) -> Result<ChainSuccess<UsdRates>, ChainError> {
        first_success(&self.sources.rates, |source| async move {
            source.latest_usd_rates().await
        })
        .await
    }

    pub async fn fetch_market_data(&self) -> Result<MarketDataFile, MarketDataError> {
        let text = self.sources.text.fetch_text(&self.market_data_file).await?;
        Ok(parse_market_data(&text)?)
    }

    /// Run the chart chain for `symbol` against the race timeout
    async fn race_chart(
        &self,
        label: &str,
        symbol: &str,
    ) -> Result<ChainSuccess<(f64, f64)>, String> {
        let chain = first_success(&self.sources.charts, |source| async move {
            let meta = source.chart_meta(symbol).await?;
            meta.prices()
                .ok_or_else(|| ClientError::MissingData(format!("no usable price for {symbol}")))
        });

        match timeout(self.race_timeout, chain).await {
            Ok(Ok(success)) => {
                info!("{} loaded via {}", label, success.source);
                Ok(success)
            }
            Ok(Err(e)) => {
                warn!("{} chart chain failed: {}", label, e);
                Err(e.to_string())
            }
            Err(_) => {
                warn!("{} timed out after {:?}", label, self.race_timeout);
                Err(format!("timed out after {} ms", self.race_timeout.as_millis()))
            }
        }
    }
}

fn fx_panel(rates: &Result<ChainSuccess<UsdRates>, ChainError>) -> FxPanel {
    match rates {
        Ok(success) => match FxMajors::from_rates(&success.value) {
            Ok(majors) => FxPanel::Loaded {
                majors,
                source: success.source.clone(),
            },
            Err(e) => {
                warn!("FX majors unavailable: {}", e);
                FxPanel::Unavailable {
                    reason: e.to_string(),
                }
            }
        },
        Err(e) => {
            warn!("FX rates unavailable: {}", e);
            FxPanel::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}

/// USD/INR comes from the rates chain; there is no local alternative
fn settle_usdinr(state: &mut QuoteState, rates: &Result<ChainSuccess<UsdRates>, ChainError>) {
    let quote = rates
        .as_ref()
        .map_err(|e| e.to_string())
        .and_then(|success| {
            success
                .value
                .usd_inr()
                .map(|quote| (quote, success.source.clone()))
                .map_err(|e| e.to_string())
        });

    match quote {
        Ok((quote, source)) => apply("USDINR", state.succeed(quote, QuoteOrigin::Network(source))),
        Err(reason) => {
            apply("USDINR", state.fall_back(&reason));
            error!("USDINR unavailable: {}", reason);
            apply("USDINR", state.fail(reason));
        }
    }
}

fn settle_dollar_index_fallback(
    state: &mut QuoteState,
    rates: &Result<ChainSuccess<UsdRates>, ChainError>,
    network_reason: &str,
) {
    let approximation = rates
        .as_ref()
        .map_err(|e| e.to_string())
        .and_then(|success| approximate_quote(&success.value).map_err(|e| e.to_string()));

    match approximation {
        Ok(quote) => {
            info!("Dollar Index approximated from FX rates: {}", quote.price);
            apply("Dollar Index", state.succeed(quote, QuoteOrigin::Approximation));
        }
        Err(reason) => {
            error!("Dollar Index unavailable: {}", reason);
            apply(
                "Dollar Index",
                state.fail(format!("{network_reason}; approximation: {reason}")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::client::DirectoryTextSource;

    #[test]
    fn test_ist_offset() {
        assert_eq!(ist().local_minus_utc(), 19_800);
    }

    #[test]
    fn test_sources_from_config_order() {
        let config = DeskConfig::default();
        let text: Arc<dyn TextSource> = Arc::new(DirectoryTextSource::new("content"));
        let sources = MarketSources::from_config(&config, Client::new(), text);

        let rate_names: Vec<&str> = sources.rates.iter().map(|s| s.name()).collect();
        let chart_names: Vec<&str> = sources.charts.iter().map(|s| s.name()).collect();
        assert_eq!(rate_names, vec!["exchangerate-api", "fixer"]);
        assert_eq!(chart_names, vec!["allorigins", "corsproxy", "direct"]);
    }
}
