//! Output renderers: HTML fragments, terminal text and JSON

pub mod html;
pub mod text;

use crate::domain::MarketSnapshot;

pub use html::{escape, market_panel, update_stamp};
pub use text::snapshot_table;

/// Snapshot as pretty-printed JSON
pub fn snapshot_json(snapshot: &MarketSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}
