//! Dollar index approximation from spot FX rates
//!
//! Uses the ICE basket weights. SEK and CAD are not part of every rate
//! table, so both are derived from CHF.

use crate::domain::{Quote, RateError, UsdRates};

const DXY_CONSTANT: f64 = 50.14348112;

const EUR_WEIGHT: f64 = -0.576;
const JPY_WEIGHT: f64 = 0.136;
const GBP_WEIGHT: f64 = -0.119;
const CAD_WEIGHT: f64 = 0.091;
const SEK_WEIGHT: f64 = 0.042;
const CHF_WEIGHT: f64 = 0.036;

const CAD_PER_CHF: f64 = 1.1;
const SEK_PER_CHF: f64 = 8.5;

/// Approximate dollar index level from a USD-based rate table
pub fn approximate_level(rates: &UsdRates) -> Result<f64, RateError> {
    let eurusd = 1.0 / rates.rate("EUR")?;
    let gbpusd = 1.0 / rates.rate("GBP")?;
    let usdjpy = rates.rate("JPY")?;
    let usdchf = rates.rate("CHF")?;
    let usdcad = usdchf * CAD_PER_CHF;
    let usdsek = usdchf * SEK_PER_CHF;

    Ok(DXY_CONSTANT
        * eurusd.powf(EUR_WEIGHT)
        * usdjpy.powf(JPY_WEIGHT)
        * gbpusd.powf(GBP_WEIGHT)
        * usdcad.powf(CAD_WEIGHT)
        * usdsek.powf(SEK_WEIGHT)
        * usdchf.powf(CHF_WEIGHT))
}

/// Approximated quote; there is no previous level, so the change is flat
pub fn approximate_quote(rates: &UsdRates) -> Result<Quote, RateError> {
    let level = approximate_level(rates)?;
    Ok(Quote::flat(format!("{:.2}", level)))
}
