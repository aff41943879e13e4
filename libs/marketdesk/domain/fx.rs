//! FX domain types
//!
//! Rate sources return a USD-based table (`1 USD = x CCY`). The majors panel
//! and the USD/INR panel are both derived from such a table.

use super::quote::Quote;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    #[error("rate for {0} missing from table")]
    Missing(String),

    #[error("rate for {currency} is not usable: {value}")]
    Invalid { currency: String, value: f64 },
}

/// USD-based rate table from a single source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsdRates {
    /// Currency code -> units of that currency per 1 USD
    pub rates: HashMap<String, f64>,
}

impl UsdRates {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self { rates }
    }

    /// Positive, finite rate for a currency code
    pub fn rate(&self, currency: &str) -> Result<f64, RateError> {
        let value = *self
            .rates
            .get(&currency.to_uppercase())
            .ok_or_else(|| RateError::Missing(currency.to_uppercase()))?;

        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(RateError::Invalid {
                currency: currency.to_uppercase(),
                value,
            })
        }
    }

    /// USD/INR quote (2 decimals, no previous close available)
    pub fn usd_inr(&self) -> Result<Quote, RateError> {
        let inr = self.rate("INR")?;
        Ok(Quote::flat(format!("{:.2}", inr)))
    }
}

/// The four majors shown in the FX panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxMajors {
    pub eurusd: Quote,
    pub gbpusd: Quote,
    pub usdjpy: Quote,
    pub usdchf: Quote,
}

impl FxMajors {
    /// Derive the majors from a USD-based table.
    ///
    /// EUR and GBP are quoted against USD, so they are inverted.
    pub fn from_rates(rates: &UsdRates) -> Result<Self, RateError> {
        let eur = rates.rate("EUR")?;
        let gbp = rates.rate("GBP")?;
        let jpy = rates.rate("JPY")?;
        let chf = rates.rate("CHF")?;

        Ok(Self {
            eurusd: Quote::flat(format!("{:.4}", 1.0 / eur)),
            gbpusd: Quote::flat(format!("{:.4}", 1.0 / gbp)),
            usdjpy: Quote::flat(format!("{:.2}", jpy)),
            usdchf: Quote::flat(format!("{:.4}", chf)),
        })
    }

    /// Rows in display order
    pub fn rows(&self) -> [(&'static str, &Quote); 4] {
        [
            ("EUR/USD", &self.eurusd),
            ("GBP/USD", &self.gbpusd),
            ("USD/JPY", &self.usdjpy),
            ("USD/CHF", &self.usdchf),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::Direction;

    fn sample_rates() -> UsdRates {
        let mut rates = HashMap::new();
        rates.insert("EUR".to_string(), 0.92);
        rates.insert("GBP".to_string(), 0.79);
        rates.insert("JPY".to_string(), 149.876);
        rates.insert("CHF".to_string(), 0.8812);
        rates.insert("INR".to_string(), 83.1234);
        UsdRates::new(rates)
    }

    #[test]
    fn test_majors_from_rates() {
        let majors = FxMajors::from_rates(&sample_rates()).unwrap();
        assert_eq!(majors.eurusd.price, "1.0870");
        assert_eq!(majors.gbpusd.price, "1.2658");
        assert_eq!(majors.usdjpy.price, "149.88");
        assert_eq!(majors.usdchf.price, "0.8812");
        assert_eq!(majors.eurusd.direction, Direction::Neutral);
    }

    #[test]
    fn test_missing_currency() {
        let mut rates = sample_rates();
        rates.rates.remove("GBP");
        assert_eq!(
            FxMajors::from_rates(&rates).unwrap_err(),
            RateError::Missing("GBP".to_string())
        );
    }

    #[test]
    fn test_zero_rate_rejected() {
        let mut rates = sample_rates();
        rates.rates.insert("EUR".to_string(), 0.0);
        assert!(matches!(
            FxMajors::from_rates(&rates),
            Err(RateError::Invalid { .. })
        ));
    }

    #[test]
    fn test_usd_inr() {
        let quote = sample_rates().usd_inr().unwrap();
        assert_eq!(quote.price, "83.12");
        assert_eq!(quote.change, "0.00%");
    }

    #[test]
    fn test_rows_order() {
        let majors = FxMajors::from_rates(&sample_rates()).unwrap();
        let names: Vec<_> = majors.rows().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF"]);
    }
}
