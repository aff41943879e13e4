//! Text resource parsers
//!
//! All resources share one convention: newline-separated records,
//! comma-separated fields, and `---`-separated blocks for dated entries.
//! Malformed records are skipped, never fatal.

pub mod article;
pub mod daily_update;
pub mod document;
pub mod market_data;
pub mod video;

use chrono::NaiveDate;
use thiserror::Error;

pub use article::parse_articles;
pub use daily_update::{classify_line, parse_daily_updates};
pub use document::parse_documents;
pub use market_data::{parse_market_data, MarketDataFile};
pub use video::{extract_video_id, parse_video_list, VideoList};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{0} is empty")]
    Empty(&'static str),

    #[error("no valid records in {resource} ({skipped} skipped)")]
    NoValidRecords {
        resource: &'static str,
        skipped: usize,
    },
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// A record that was dropped while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the resource
    pub line_no: usize,
    pub content: String,
    pub reason: &'static str,
}

impl SkippedLine {
    pub(crate) fn new(line_no: usize, content: &str, reason: &'static str) -> Self {
        Self {
            line_no,
            content: content.to_string(),
            reason,
        }
    }
}

/// Non-blank trimmed lines with their 1-based line numbers
pub(crate) fn records(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// `YYYY-MM-DD` shape check (digits and dashes only)
pub fn has_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Strict `YYYY-MM-DD` date
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if !has_iso_date_shape(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
