//! Fetch-then-parse for the content panels
//!
//! A failed fetch of the video list falls back to a small embedded list so
//! the panel is never empty. Every other failure becomes an inline message
//! for that panel only.

use crate::domain::parsing::{
    parse_articles, parse_daily_updates, parse_documents, parse_video_list, ParseError,
};
use crate::domain::{ArticleEntry, DailyUpdate, DocumentEntry, VideoEntry};
use crate::infrastructure::client::{ContentError, DirectoryTextSource, HttpTextSource, TextSource};
use crate::infrastructure::config::{ContentConfig, ContentFiles};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

const EMBEDDED_VIDEOS: [(&str, &str); 5] = [
    ("sGTE5cCSS5A", "Daily Market Analysis"),
    ("I92sJtW3-zE", "Currency Market Insights"),
    ("QORciehbd48", "Market Pulse & Trends"),
    ("Z4v9WImeeRY", "Treasury & Risk Management"),
    ("wA8iDJIq4mQ", "Daily Market Commentary"),
];

/// Videos shown when the video list cannot be fetched at all
pub fn embedded_videos() -> Vec<VideoEntry> {
    EMBEDDED_VIDEOS
        .iter()
        .map(|(id, title)| VideoEntry::new(*id, *title))
        .collect()
}

/// Result of loading one content panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ContentOutcome<T> {
    Loaded { items: T },
    /// The resource could not be fetched; `items` is the embedded list
    Fallback { items: T, reason: String },
    /// `detail` carries the underlying error, when there is one
    Unavailable {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

impl<T> ContentOutcome<T> {
    pub fn items(&self) -> Option<&T> {
        match self {
            ContentOutcome::Loaded { items } | ContentOutcome::Fallback { items, .. } => Some(items),
            ContentOutcome::Unavailable { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ContentOutcome::Loaded { .. })
    }

    fn unavailable(message: String, detail: Option<String>) -> Self {
        ContentOutcome::Unavailable { message, detail }
    }
}

/// Build the text source named by the content configuration
pub fn text_source_from_config(
    config: &ContentConfig,
    client: Client,
) -> Result<Arc<dyn TextSource>, ContentError> {
    match (&config.base_url, &config.directory) {
        (Some(base_url), _) => Ok(Arc::new(HttpTextSource::new(base_url, client)?)),
        (None, Some(dir)) => Ok(Arc::new(DirectoryTextSource::new(dir.clone()))),
        (None, None) => Err(ContentError::InvalidUrl(
            "no content location configured".to_string(),
        )),
    }
}

pub struct ContentLoader {
    source: Arc<dyn TextSource>,
    files: ContentFiles,
}

impl ContentLoader {
    pub fn new(source: Arc<dyn TextSource>, files: ContentFiles) -> Self {
        Self { source, files }
    }

    pub async fn videos(&self) -> ContentOutcome<Vec<VideoEntry>> {
        let file = &self.files.videos;
        let text = match self.source.fetch_text(file).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to load {}: {}. Using embedded video list", file, e);
                return ContentOutcome::Fallback {
                    items: embedded_videos(),
                    reason: format!("Error loading {file}: {e}"),
                };
            }
        };

        match parse_video_list(&text) {
            Ok(list) => {
                for skipped in &list.skipped {
                    warn!(
                        "Skipping line {} of {} ({}): {}",
                        skipped.line_no, file, skipped.reason, skipped.content
                    );
                }
                info!("Loaded {} videos from {}", list.entries.len(), file);
                ContentOutcome::Loaded {
                    items: list.entries,
                }
            }
            Err(ParseError::Empty(_)) => {
                error!("{} is empty", file);
                ContentOutcome::unavailable(
                    format!("No videos found in {file} file. Please add YouTube URLs to the file."),
                    None,
                )
            }
            Err(e) => {
                error!("No valid videos in {}: {}", file, e);
                ContentOutcome::unavailable(
                    format!("No valid YouTube URLs found in {file}. Please check the file format."),
                    None,
                )
            }
        }
    }

    pub async fn articles(&self, today: NaiveDate) -> ContentOutcome<Vec<ArticleEntry>> {
        let file = &self.files.articles;
        let loaded = self
            .fetch(file)
            .await
            .and_then(|text| parse_articles(&text, today).map_err(|e| e.to_string()));
        settle(file, "articles", loaded)
    }

    pub async fn documents(&self) -> ContentOutcome<Vec<DocumentEntry>> {
        let file = &self.files.documents;
        let loaded = self
            .fetch(file)
            .await
            .and_then(|text| parse_documents(&text).map_err(|e| e.to_string()));
        settle(file, "documents", loaded)
    }

    pub async fn daily_updates(&self) -> ContentOutcome<Vec<DailyUpdate>> {
        let file = &self.files.daily_updates;
        let loaded = self
            .fetch(file)
            .await
            .and_then(|text| parse_daily_updates(&text).map_err(|e| e.to_string()));

        match loaded {
            Ok(updates) => {
                info!("Loaded {} daily updates from {}", updates.len(), file);
                ContentOutcome::Loaded { items: updates }
            }
            Err(reason) => {
                error!("Error loading daily updates: {}", reason);
                ContentOutcome::unavailable(
                    format!("Unable to load daily updates. Please check if {file} file exists."),
                    Some(reason),
                )
            }
        }
    }

    async fn fetch(&self, file: &str) -> Result<String, String> {
        self.source
            .fetch_text(file)
            .await
            .map_err(|e| e.to_string())
    }
}

fn settle<T>(file: &str, what: &str, loaded: Result<Vec<T>, String>) -> ContentOutcome<Vec<T>> {
    match loaded {
        Ok(items) => {
            info!("Loaded {} {} from {}", items.len(), what, file);
            ContentOutcome::Loaded { items }
        }
        Err(reason) => {
            error!("Error loading {}: {}", file, reason);
            ContentOutcome::unavailable(
                format!("Unable to load {what} from {file}."),
                Some(reason),
            )
        }
    }
}
