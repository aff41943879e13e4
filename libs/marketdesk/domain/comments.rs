//! Market commentary bundle
//!
//! Hand-written notes that accompany the live quotes: one-line comments for
//! the dollar index, USD/INR and the equity indices, the technical pulse and
//! the FPI/DII flow table.

use super::quote::Direction;
use serde::{Deserialize, Serialize};

/// One FPI/DII flow row: `label, value, note, direction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FpiDiiRow {
    pub label: String,
    pub value: String,
    pub note: String,
    pub direction: Direction,
}

impl FpiDiiRow {
    /// Build a row from at least four comma-separated fields.
    /// Extra fields are ignored.
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        if fields.len() < 4 {
            return None;
        }
        Some(Self {
            label: fields[0].trim().to_string(),
            value: fields[1].trim().to_string(),
            note: fields[2].trim().to_string(),
            direction: Direction::parse_lenient(fields[3]),
        })
    }
}

/// A technical pulse line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TechnicalLine {
    /// `Label: description`, rendered with a bold label
    Labeled { label: String, text: String },
    /// No colon, rendered as a plain paragraph
    Plain { text: String },
}

impl TechnicalLine {
    /// Split on the first colon; everything after it is the description.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        match trimmed.split_once(':') {
            Some((label, text)) => Some(TechnicalLine::Labeled {
                label: label.trim().to_string(),
                text: text.trim().to_string(),
            }),
            None => Some(TechnicalLine::Plain {
                text: trimmed.to_string(),
            }),
        }
    }
}

/// Commentary parsed from the market-data resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsBundle {
    pub dxy: String,
    pub usdinr: String,
    pub indices: String,
    pub technical: Vec<String>,
    pub fpidii: Vec<[String; 4]>,
}

impl CommentsBundle {
    /// FPI/DII rows, or the built-in defaults when the file had none
    pub fn fpi_dii_rows(&self) -> Vec<FpiDiiRow> {
        let rows: Vec<FpiDiiRow> = self
            .fpidii
            .iter()
            .filter_map(|fields| {
                let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
                FpiDiiRow::from_fields(&refs)
            })
            .collect();

        if rows.is_empty() {
            default_fpi_dii_rows()
        } else {
            rows
        }
    }

    /// Technical pulse lines, or the built-in defaults when the file had none
    pub fn technical_lines(&self) -> Vec<TechnicalLine> {
        let lines: Vec<TechnicalLine> = self
            .technical
            .iter()
            .filter_map(|line| TechnicalLine::parse(line))
            .collect();

        if lines.is_empty() {
            default_technical_lines()
        } else {
            lines
        }
    }

    pub fn has_technical(&self) -> bool {
        self.technical.iter().any(|line| !line.trim().is_empty())
    }
}

const DEFAULT_FPI_DII: [[&str; 4]; 2] = [
    ["FPI (Net)", "+₹1,250 Cr", "Buying", "up"],
    ["DII (Net)", "-₹850 Cr", "Selling", "down"],
];

const DEFAULT_TECHNICAL: [&str; 3] = [
    "Nifty: Trading above key support at 22,200. Next resistance at 22,600.",
    "USDINR: Range-bound between 82.80-83.30. Breakout in either direction could signal next major move.",
    "Dollar Index: Key level at 103.50. A break below could trigger further weakness.",
];

pub fn default_fpi_dii_rows() -> Vec<FpiDiiRow> {
    DEFAULT_FPI_DII
        .iter()
        .filter_map(|fields| FpiDiiRow::from_fields(fields))
        .collect()
}

pub fn default_technical_lines() -> Vec<TechnicalLine> {
    DEFAULT_TECHNICAL
        .iter()
        .filter_map(|line| TechnicalLine::parse(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_with_colon_is_labeled() {
        let line = TechnicalLine::parse("Nifty: support at 22,200").unwrap();
        assert_eq!(
            line,
            TechnicalLine::Labeled {
                label: "Nifty".to_string(),
                text: "support at 22,200".to_string(),
            }
        );
    }

    #[test]
    fn test_only_first_colon_splits() {
        let line = TechnicalLine::parse("Watch: open at 09:15 IST").unwrap();
        assert_eq!(
            line,
            TechnicalLine::Labeled {
                label: "Watch".to_string(),
                text: "open at 09:15 IST".to_string(),
            }
        );
    }

    #[test]
    fn test_line_without_colon_is_plain() {
        let line = TechnicalLine::parse("  Markets consolidate  ").unwrap();
        assert_eq!(
            line,
            TechnicalLine::Plain {
                text: "Markets consolidate".to_string()
            }
        );
        assert!(TechnicalLine::parse("   ").is_none());
    }

    #[test]
    fn test_defaults_when_empty() {
        let bundle = CommentsBundle::default();
        assert_eq!(bundle.fpi_dii_rows().len(), 2);
        assert_eq!(bundle.fpi_dii_rows()[1].direction, Direction::Down);
        assert_eq!(bundle.technical_lines().len(), 3);
        assert!(!bundle.has_technical());
    }

    #[test]
    fn test_file_rows_replace_defaults() {
        let bundle = CommentsBundle {
            fpidii: vec![[
                "FPI (Net)".to_string(),
                "-₹2,100 Cr".to_string(),
                "Selling".to_string(),
                "down".to_string(),
            ]],
            technical: vec!["Plain note".to_string()],
            ..Default::default()
        };

        let rows = bundle.fpi_dii_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, "-₹2,100 Cr");
        assert_eq!(
            bundle.technical_lines(),
            vec![TechnicalLine::Plain {
                text: "Plain note".to_string()
            }]
        );
    }

    #[test]
    fn test_row_needs_four_fields() {
        assert!(FpiDiiRow::from_fields(&["FPI", "+1", "Buying"]).is_none());
    }
}
