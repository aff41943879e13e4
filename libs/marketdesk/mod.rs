//! Market Desk
//!
//! Content engine for a finance-commentary site: text resource parsers,
//! best-effort market quote aggregation and HTML fragment rendering.

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used items
pub use application::{
    render, text_source_from_config, ContentLoader, ContentOutcome, MarketSnapshotAggregator,
    MarketSources, PanelId, SiteBuilder, SiteReport,
};
pub use domain::{
    CommentsBundle, Direction, FxMajors, MarketSnapshot, Quote, QuoteOrigin, QuoteState,
};
pub use infrastructure::{http_client, init_tracing_with_level, DeskConfig, ShutdownManager};
