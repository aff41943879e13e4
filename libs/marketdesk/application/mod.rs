//! Application layer: fallback chains, aggregation, loading and rendering

pub mod aggregator;
pub mod content_loader;
pub mod dollar_index;
pub mod fallback;
pub mod render;
pub mod site;

pub use aggregator::{MarketDataError, MarketSnapshotAggregator, MarketSources};
pub use content_loader::{embedded_videos, text_source_from_config, ContentLoader, ContentOutcome};
pub use dollar_index::{approximate_level, approximate_quote};
pub use fallback::{first_success, ChainError, ChainSuccess, SourceFailure};
pub use site::{Fragment, PanelId, SiteBuilder, SiteReport};
