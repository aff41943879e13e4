//! Common test utilities for marketdesk integration tests
//!
//! In-memory stand-ins for the rate, chart and text sources so no test
//! touches the network.

#![allow(dead_code)]

use async_trait::async_trait;
use marketdesk::domain::{ChartMeta, UsdRates};
use marketdesk::infrastructure::client::{
    ChartSource, ClientError, ContentError, RateSource, Source, TextSource,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

pub mod fixtures {
    //! Canned resources

    use super::*;

    /// A plausible USD table with everything the majors and DXY need
    pub fn usd_rates() -> HashMap<String, f64> {
        HashMap::from([
            ("EUR".to_string(), 0.92),
            ("GBP".to_string(), 0.79),
            ("JPY".to_string(), 149.5),
            ("CHF".to_string(), 0.88),
            ("INR".to_string(), 83.12),
        ])
    }

    pub fn market_data() -> &'static str {
        "Dollar_Index\n\
         DXY steady ahead of US data.\n\
         USDINR\n\
         Rupee holds near 83.\n\
         Indian_Equity_Indices\n\
         Indices consolidate near highs.\n\
         Nifty 50,24350,+0.45%,up\n\
         Bank Nifty,51200,-0.12%,down\n\
         FPI/DII_Activity\n\
         FPI (Net),+₹2,100 Cr,Buying,up\n\
         Technical_Pulse\n\
         Nifty: support at 24,100\n\
         Last_Updated\n\
         16 Oct 2026, 6:00 pm\n"
    }

    pub fn chart(price: f64, previous: f64) -> ChartMeta {
        ChartMeta {
            regular_market_price: Some(price),
            previous_close: Some(previous),
        }
    }
}

/// Rate source that either returns a fixed table or fails
pub struct FakeRates {
    name: String,
    rates: Option<HashMap<String, f64>>,
    pub calls: AtomicUsize,
}

impl FakeRates {
    pub fn ok(name: &str, rates: HashMap<String, f64>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            rates: Some(rates),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            rates: None,
            calls: AtomicUsize::new(0),
        })
    }
}

impl Source for FakeRates {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl RateSource for FakeRates {
    async fn latest_usd_rates(&self) -> Result<UsdRates, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.rates {
            Some(rates) => Ok(UsdRates::new(rates.clone())),
            None => Err(ClientError::ApiError {
                status: 503,
                message: "Service Unavailable".to_string(),
            }),
        }
    }
}

/// Chart source with per-symbol answers and an optional delay
pub struct FakeChart {
    name: String,
    metas: HashMap<String, ChartMeta>,
    delays: HashMap<String, Duration>,
}

impl FakeChart {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metas: HashMap::new(),
            delays: HashMap::new(),
        }
    }

    pub fn with(mut self, symbol: &str, meta: ChartMeta) -> Self {
        self.metas.insert(symbol.to_string(), meta);
        self
    }

    pub fn slow(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Source for FakeChart {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl ChartSource for FakeChart {
    async fn chart_meta(&self, symbol: &str) -> Result<ChartMeta, ClientError> {
        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }
        self.metas.get(symbol).copied().ok_or_else(|| ClientError::ApiError {
            status: 404,
            message: format!("No data found, symbol may be delisted: {symbol}"),
        })
    }
}

/// Text resources held in memory
#[derive(Default)]
pub struct MemoryText {
    files: HashMap<String, String>,
    fail_first: usize,
    pub fetches: AtomicUsize,
}

impl MemoryText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, content: &str) -> Self {
        self.files.insert(name.to_string(), content.to_string());
        self
    }

    /// Answer the first `n` fetches with HTTP 503
    pub fn failing_first(mut self, n: usize) -> Self {
        self.fail_first = n;
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextSource for MemoryText {
    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn fetch_text(&self, name: &str) -> Result<String, ContentError> {
        let attempt = self.fetches.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_first {
            return Err(ContentError::Status {
                name: name.to_string(),
                status: 503,
            });
        }
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| ContentError::Status {
                name: name.to_string(),
                status: 404,
            })
    }
}
