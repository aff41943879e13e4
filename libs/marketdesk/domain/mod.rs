//! Domain Layer
//!
//! Pure content and market models plus the text resource parsers.
//! This layer has no dependencies on infrastructure or application layers.

pub mod comments;
pub mod content;
pub mod fx;
pub mod parsing;
pub mod quote;
pub mod snapshot;

// Re-export domain models
pub use comments::{CommentsBundle, FpiDiiRow, TechnicalLine};
pub use content::{ArticleEntry, DailyUpdate, DocumentEntry, DocumentKind, UpdateLine, VideoEntry};
pub use fx::{FxMajors, RateError, UsdRates};
pub use quote::{format_indian, percent_change, ChartMeta, Direction, Quote};
pub use snapshot::{FxPanel, MarketSnapshot, QuoteOrigin, QuoteState, TransitionError};
