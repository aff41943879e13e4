//! Market snapshot and per-quote lifecycle
//!
//! Every quote moves through
//! `NotStarted -> Fetching -> {Succeeded | FallbackFetching -> {Succeeded | Failed}}`.
//! Only `Succeeded` and `Failed` are terminal, so a rendered panel always
//! shows either data or an explicit "unavailable" placeholder.

use super::comments::CommentsBundle;
use super::fx::FxMajors;
use super::quote::Quote;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a successful quote came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "source", rename_all = "snake_case")]
pub enum QuoteOrigin {
    /// A network source, by name
    Network(String),
    /// Computed locally from other quotes
    Approximation,
    /// Read from the market-data text resource
    LocalFile,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid quote transition {from} -> {to}")]
pub struct TransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

/// Lifecycle of a single quote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuoteState {
    #[default]
    NotStarted,
    Fetching,
    FallbackFetching { reason: String },
    Succeeded { quote: Quote, origin: QuoteOrigin },
    Failed { reason: String },
}

impl QuoteState {
    pub fn name(&self) -> &'static str {
        match self {
            QuoteState::NotStarted => "not_started",
            QuoteState::Fetching => "fetching",
            QuoteState::FallbackFetching { .. } => "fallback_fetching",
            QuoteState::Succeeded { .. } => "succeeded",
            QuoteState::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, QuoteState::Succeeded { .. } | QuoteState::Failed { .. })
    }

    pub fn quote(&self) -> Option<&Quote> {
        match self {
            QuoteState::Succeeded { quote, .. } => Some(quote),
            _ => None,
        }
    }

    pub fn origin(&self) -> Option<&QuoteOrigin> {
        match self {
            QuoteState::Succeeded { origin, .. } => Some(origin),
            _ => None,
        }
    }

    /// `NotStarted -> Fetching`
    pub fn start(&mut self) -> Result<(), TransitionError> {
        match self {
            QuoteState::NotStarted => {
                *self = QuoteState::Fetching;
                Ok(())
            }
            _ => Err(self.invalid("fetching")),
        }
    }

    /// `Fetching -> FallbackFetching`
    pub fn fall_back(&mut self, reason: impl Into<String>) -> Result<(), TransitionError> {
        match self {
            QuoteState::Fetching => {
                *self = QuoteState::FallbackFetching {
                    reason: reason.into(),
                };
                Ok(())
            }
            _ => Err(self.invalid("fallback_fetching")),
        }
    }

    /// `Fetching | FallbackFetching -> Succeeded`
    pub fn succeed(&mut self, quote: Quote, origin: QuoteOrigin) -> Result<(), TransitionError> {
        match self {
            QuoteState::Fetching | QuoteState::FallbackFetching { .. } => {
                *self = QuoteState::Succeeded { quote, origin };
                Ok(())
            }
            _ => Err(self.invalid("succeeded")),
        }
    }

    /// `FallbackFetching -> Failed`
    ///
    /// A primary failure must go through the fallback step first.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), TransitionError> {
        match self {
            QuoteState::FallbackFetching { .. } => {
                *self = QuoteState::Failed {
                    reason: reason.into(),
                };
                Ok(())
            }
            _ => Err(self.invalid("failed")),
        }
    }

    fn invalid(&self, to: &'static str) -> TransitionError {
        TransitionError {
            from: self.name(),
            to,
        }
    }
}

/// Outcome of the FX majors panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FxPanel {
    Loaded { majors: FxMajors, source: String },
    Unavailable { reason: String },
}

impl FxPanel {
    pub fn majors(&self) -> Option<&FxMajors> {
        match self {
            FxPanel::Loaded { majors, .. } => Some(majors),
            FxPanel::Unavailable { .. } => None,
        }
    }
}

/// Everything the market panel shows for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub fx_majors: FxPanel,
    pub dollar_index: QuoteState,
    pub usdinr: QuoteState,
    pub nifty: QuoteState,
    pub bank_nifty: QuoteState,
    /// `None` when the market-data resource could not be read
    pub comments: Option<CommentsBundle>,
    /// `Last_Updated` label from the market-data resource
    pub last_updated: Option<String>,
    /// Capture time, India Standard Time
    pub captured_at: DateTime<FixedOffset>,
}

impl MarketSnapshot {
    /// Comments, or an empty bundle so the defaults kick in
    pub fn comments_or_default(&self) -> CommentsBundle {
        self.comments.clone().unwrap_or_default()
    }

    /// All quote states have reached a terminal state
    pub fn is_settled(&self) -> bool {
        [&self.dollar_index, &self.usdinr, &self.nifty, &self.bank_nifty]
            .iter()
            .all(|state| state.is_terminal())
    }

    /// Human-readable capture time, e.g. `16 Oct 2026, 09:15:02 am IST`
    pub fn captured_label(&self) -> String {
        format!("{} IST", self.captured_at.format("%-d %b %Y, %I:%M:%S %P"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::Direction;

    fn quote() -> Quote {
        Quote::new("103.25", "+0.12%", Direction::Up)
    }

    #[test]
    fn test_primary_success_path() {
        let mut state = QuoteState::default();
        assert_eq!(state, QuoteState::NotStarted);
        state.start().unwrap();
        state
            .succeed(quote(), QuoteOrigin::Network("allorigins".to_string()))
            .unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.quote(), Some(&quote()));
    }

    #[test]
    fn test_fallback_then_fail() {
        let mut state = QuoteState::default();
        state.start().unwrap();
        state.fall_back("all relays failed").unwrap();
        assert!(!state.is_terminal());
        state.fail("no approximation").unwrap();
        assert_eq!(
            state,
            QuoteState::Failed {
                reason: "no approximation".to_string()
            }
        );
    }

    #[test]
    fn test_cannot_fail_without_fallback() {
        let mut state = QuoteState::default();
        state.start().unwrap();
        let err = state.fail("boom").unwrap_err();
        assert_eq!(err.from, "fetching");
        assert_eq!(err.to, "failed");
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut state = QuoteState::default();
        state.start().unwrap();
        state.succeed(quote(), QuoteOrigin::LocalFile).unwrap();
        assert!(state.start().is_err());
        assert!(state.fall_back("late").is_err());
        assert!(state.succeed(quote(), QuoteOrigin::Approximation).is_err());
    }

    #[test]
    fn test_cannot_succeed_before_start() {
        let mut state = QuoteState::default();
        assert!(state.succeed(quote(), QuoteOrigin::LocalFile).is_err());
        assert_eq!(state, QuoteState::NotStarted);
    }
}
