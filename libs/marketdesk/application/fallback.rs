//! Ordered fallback chains
//!
//! Sources are tried one after another in priority order; the first success
//! wins and later sources are never contacted.

use crate::infrastructure::client::{ClientError, Source};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// One failed attempt in a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: String,
    pub reason: String,
}

fn summarize(failures: &[SourceFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.source, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("no sources configured")]
    NoSources,

    #[error("all sources failed ({})", summarize(.0))]
    Exhausted(Vec<SourceFailure>),
}

/// Winning value plus the name of the source that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSuccess<T> {
    pub value: T,
    pub source: String,
    /// Sources that failed before the winner
    pub failures: Vec<SourceFailure>,
}

/// Try `attempt` against each source in order until one succeeds
pub async fn first_success<S, T, F, Fut>(
    sources: &[Arc<S>],
    mut attempt: F,
) -> Result<ChainSuccess<T>, ChainError>
where
    S: Source + ?Sized,
    F: FnMut(Arc<S>) -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    if sources.is_empty() {
        return Err(ChainError::NoSources);
    }

    let mut failures = Vec::new();
    for source in sources {
        let name = source.name().to_string();
        debug!("Trying source {}", name);

        match attempt(Arc::clone(source)).await {
            Ok(value) => {
                return Ok(ChainSuccess {
                    value,
                    source: name,
                    failures,
                })
            }
            Err(e) => {
                warn!("Source {} failed: {}", name, e);
                failures.push(SourceFailure {
                    source: name,
                    reason: e.to_string(),
                });
            }
        }
    }

    Err(ChainError::Exhausted(failures))
}
