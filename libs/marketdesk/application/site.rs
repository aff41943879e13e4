//! Whole-site rendering
//!
//! Loads every panel concurrently, renders each into the fragment of its
//! container and writes `<container-id>.html` files. A panel that fails to
//! write is reported; the others are still written.

use super::aggregator::{ist, MarketSnapshotAggregator};
use super::content_loader::ContentLoader;
use super::render::html;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Page containers, one fragment each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Videos,
    Articles,
    Documents,
    DailyUpdates,
    DailyMarket,
    UpdateStamp,
}

impl PanelId {
    pub const ALL: [PanelId; 6] = [
        PanelId::Videos,
        PanelId::Articles,
        PanelId::Documents,
        PanelId::DailyUpdates,
        PanelId::DailyMarket,
        PanelId::UpdateStamp,
    ];

    /// Element ID in the page markup
    pub fn container_id(&self) -> &'static str {
        match self {
            PanelId::Videos => "videos-container",
            PanelId::Articles => "articles-container",
            PanelId::Documents => "documents-container",
            PanelId::DailyUpdates => "daily-updates-container",
            PanelId::DailyMarket => "daily-market-container",
            PanelId::UpdateStamp => "daily-update-container",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.html", self.container_id())
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.container_id())
    }
}

/// One rendered fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub panel: PanelId,
    pub html: String,
}

/// What `build` wrote
#[derive(Debug, Default)]
pub struct SiteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PanelId, String)>,
}

impl SiteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct SiteBuilder {
    loader: ContentLoader,
    aggregator: MarketSnapshotAggregator,
    output_dir: PathBuf,
}

impl SiteBuilder {
    pub fn new(
        loader: ContentLoader,
        aggregator: MarketSnapshotAggregator,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            loader,
            aggregator,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Load and render every panel, in `PanelId::ALL` order
    pub async fn render(&self, today: NaiveDate) -> Vec<Fragment> {
        let (videos, articles, documents, updates, snapshot) = tokio::join!(
            self.loader.videos(),
            self.loader.articles(today),
            self.loader.documents(),
            self.loader.daily_updates(),
            self.aggregator.snapshot(),
        );

        vec![
            Fragment {
                panel: PanelId::Videos,
                html: html::videos_panel(&videos),
            },
            Fragment {
                panel: PanelId::Articles,
                html: html::articles_panel(&articles),
            },
            Fragment {
                panel: PanelId::Documents,
                html: html::documents_panel(&documents),
            },
            Fragment {
                panel: PanelId::DailyUpdates,
                html: html::daily_updates_panel(&updates, today),
            },
            Fragment {
                panel: PanelId::DailyMarket,
                html: html::market_panel(&snapshot),
            },
            Fragment {
                panel: PanelId::UpdateStamp,
                html: html::update_stamp(&snapshot),
            },
        ]
    }

    /// Render everything for today (IST) and write the fragments
    pub async fn build(&self) -> Result<SiteReport> {
        let today = Utc::now().with_timezone(&ist()).date_naive();
        let fragments = self.render(today).await;
        self.write(&fragments).await
    }

    pub async fn write(&self, fragments: &[Fragment]) -> Result<SiteReport> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;

        let writes = fragments.iter().map(|fragment| async move {
            let path = self.output_dir.join(fragment.panel.file_name());
            let result = tokio::fs::write(&path, &fragment.html).await;
            (fragment.panel, path, result)
        });

        let mut report = SiteReport::default();
        for (panel, path, result) in join_all(writes).await {
            match result {
                Ok(()) => {
                    info!("Wrote {}", path.display());
                    report.written.push(path);
                }
                Err(e) => {
                    error!("Failed to write {}: {}", path.display(), e);
                    report.failed.push((panel, e.to_string()));
                }
            }
        }

        Ok(report)
    }
}
