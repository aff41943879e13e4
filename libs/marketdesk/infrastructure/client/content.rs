//! Text resource sources
//!
//! Over HTTP every request carries a `t=<millis>` query parameter and
//! no-cache headers so an edited file shows up on the next run.

use super::source::TextSource;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Url};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("{name} returned HTTP {status}")]
    Status { name: String, status: u16 },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid resource URL: {0}")]
    InvalidUrl(String),
}

/// Resources served under a base URL
pub struct HttpTextSource {
    base_url: Url,
    client: Client,
}

impl HttpTextSource {
    pub fn new(base_url: &str, client: Client) -> Result<Self, ContentError> {
        // without the trailing slash `join` would replace the last segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&normalized).map_err(|e| ContentError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { base_url, client })
    }

    /// Resource URL with a cache-busting timestamp
    pub fn resource_url(&self, name: &str, millis: i64) -> Result<Url, ContentError> {
        let mut url = self
            .base_url
            .join(name)
            .map_err(|e| ContentError::InvalidUrl(format!("{name}: {e}")))?;
        url.query_pairs_mut().append_pair("t", &millis.to_string());
        Ok(url)
    }
}

#[async_trait]
impl TextSource for HttpTextSource {
    fn location(&self) -> String {
        self.base_url.to_string()
    }

    async fn fetch_text(&self, name: &str) -> Result<String, ContentError> {
        let url = self.resource_url(name, Utc::now().timestamp_millis())?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Resources read from a local directory
pub struct DirectoryTextSource {
    root: PathBuf,
}

impl DirectoryTextSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl TextSource for DirectoryTextSource {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch_text(&self, name: &str) -> Result<String, ContentError> {
        let path = self.root.join(name);
        debug!("Reading {}", path.display());

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ContentError::Io { path, source })
    }
}
