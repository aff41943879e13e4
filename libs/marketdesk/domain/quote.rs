//! Quote primitives
//!
//! A quote is the display triple produced by every market fetch routine:
//! a formatted price, a signed percentage change and a direction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price movement direction, rendered as a CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Neutral,
}

impl Direction {
    /// CSS class / wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Neutral => "neutral",
        }
    }

    /// Lenient parse used for hand-edited text resources.
    /// Anything other than `up`/`down` is neutral.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Direction::Up,
            "down" => Direction::Down,
            _ => Direction::Neutral,
        }
    }

    /// Direction of an already rounded percentage change
    fn from_rounded(change: f64) -> Self {
        if change > 0.0 {
            Direction::Up
        } else if change < 0.0 {
            Direction::Down
        } else {
            Direction::Neutral
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price / change / direction triple for one instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub price: String,
    pub change: String,
    pub direction: Direction,
}

impl Quote {
    pub fn new(price: impl Into<String>, change: impl Into<String>, direction: Direction) -> Self {
        Self {
            price: price.into(),
            change: change.into(),
            direction,
        }
    }

    /// Quote for a source that has no previous close
    pub fn flat(price: impl Into<String>) -> Self {
        Self::new(price, "0.00%", Direction::Neutral)
    }

    /// Build a quote from current and previous values.
    ///
    /// `price` is the already formatted current value.
    pub fn from_move(price: impl Into<String>, current: f64, previous: f64) -> Self {
        let (change, direction) = percent_change(current, previous);
        Self::new(price, change, direction)
    }
}

/// Signed percentage change with 2 decimals, e.g. `+0.25%`
///
/// The direction follows the rounded figure so `+0.00%` is never shown as up.
pub fn percent_change(current: f64, previous: f64) -> (String, Direction) {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return ("0.00%".to_string(), Direction::Neutral);
    }

    let raw = (current - previous) / previous * 100.0;
    let rounded = (raw * 100.0).round() / 100.0;
    let direction = Direction::from_rounded(rounded);

    let text = match direction {
        Direction::Up => format!("+{:.2}%", rounded),
        Direction::Down => format!("{:.2}%", rounded),
        Direction::Neutral => "0.00%".to_string(),
    };
    (text, direction)
}

/// Round to a whole number and group digits the Indian way (`1,23,456`)
pub fn format_indian(value: f64) -> String {
    let rounded = value.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, last3) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), last3)
    };

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Price fields of one chart response
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartMeta {
    pub regular_market_price: Option<f64>,
    pub previous_close: Option<f64>,
}

/// Assumed previous close, as a fraction of the current price, when the
/// chart carries none
const ASSUMED_PREVIOUS_RATIO: f64 = 0.998;

impl ChartMeta {
    /// `(current, previous)` prices.
    ///
    /// Current falls back to the previous close; previous falls back to
    /// `current * 0.998`. Zero, negative and non-finite values count as
    /// missing. `None` when neither price is usable.
    pub fn prices(&self) -> Option<(f64, f64)> {
        let usable = |value: Option<f64>| value.filter(|v| v.is_finite() && *v > 0.0);
        let previous = usable(self.previous_close);
        let current = usable(self.regular_market_price).or(previous)?;
        Some((current, previous.unwrap_or(current * ASSUMED_PREVIOUS_RATIO)))
    }
}
