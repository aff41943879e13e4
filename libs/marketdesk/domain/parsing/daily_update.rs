//! Daily update parsing
//!
//! Blocks are separated by a line holding only `---`. The first line of a
//! block is its `YYYY-MM-DD` date, the remaining lines are the content.

use super::{parse_iso_date, ParseError, Result};
use crate::domain::content::{DailyUpdate, UpdateLine};
use tracing::debug;

const BLOCK_SEPARATOR: &str = "---";

/// Split text into blocks on separator lines
fn blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = vec![Vec::new()];
    for line in text.lines() {
        if line.trim() == BLOCK_SEPARATOR {
            blocks.push(Vec::new());
        } else if let Some(current) = blocks.last_mut() {
            current.push(line);
        }
    }
    blocks
}

/// Classify one content line for rendering
pub fn classify_line(line: &str) -> UpdateLine {
    let line = line.trim();
    if line.is_empty() {
        return UpdateLine::Break;
    }

    if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
        return UpdateLine::Bullet(rest.trim().to_string());
    }

    let lower = line.to_lowercase();
    if lower.contains("highlights") || lower.contains("key") {
        UpdateLine::Subheading(line.to_string())
    } else {
        UpdateLine::Paragraph(line.to_string())
    }
}

/// Parse dated update blocks, newest first.
///
/// Blocks without a `YYYY-MM-DD` first line or without content are
/// dropped. Blocks sharing a date keep their file order.
pub fn parse_daily_updates(text: &str) -> Result<Vec<DailyUpdate>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty("daily updates"));
    }

    let mut updates = Vec::new();
    let mut skipped = 0;

    for block in blocks(text) {
        let mut lines = block.iter().copied().map(str::trim).skip_while(|line| line.is_empty());
        let Some(header) = lines.next() else {
            continue;
        };

        let content: Vec<&str> = lines.collect();
        let first = content.iter().position(|line| !line.is_empty());
        let last = content.iter().rposition(|line| !line.is_empty());
        let (Some(first), Some(last)) = (first, last) else {
            debug!(header, "Skipping daily update without content");
            skipped += 1;
            continue;
        };

        let Some(date) = parse_iso_date(header) else {
            debug!(header, "Skipping daily update without a YYYY-MM-DD date");
            skipped += 1;
            continue;
        };

        updates.push(DailyUpdate {
            date,
            lines: content[first..=last].iter().map(|line| classify_line(line)).collect(),
        });
    }

    if updates.is_empty() {
        return Err(ParseError::NoValidRecords {
            resource: "daily updates",
            skipped,
        });
    }

    // stable, so equal dates keep file order
    updates.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(updates)
}
