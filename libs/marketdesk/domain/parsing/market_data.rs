//! Market-data commentary file
//!
//! A flat list of lines where a bare section name opens a section that runs
//! until the next one:
//!
//! ```text
//! Dollar_Index
//! DXY steady ahead of US data.
//! Indian_Equity_Indices
//! Indices consolidate near highs.
//! Nifty 50,24350,+0.45%,up
//! Bank Nifty,51200,-0.12%,down
//! FPI/DII_Activity
//! FPI (Net),+₹1,250 Cr,Buying,up
//! Technical_Pulse
//! Nifty: support at 24,100
//! Last_Updated
//! 13 Oct 2025, 6:00 pm
//! ```

use super::{ParseError, Result};
use crate::domain::comments::CommentsBundle;
use crate::domain::quote::{Direction, Quote};

pub const NIFTY_50: &str = "Nifty 50";
pub const BANK_NIFTY: &str = "Bank Nifty";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    FxMajors,
    DollarIndex,
    Usdinr,
    Indices,
    FpiDii,
    Technical,
    LastUpdated,
}

impl Section {
    fn from_header(line: &str) -> Option<Self> {
        match line {
            "FX_Majors" => Some(Section::FxMajors),
            "Dollar_Index" => Some(Section::DollarIndex),
            "USDINR" => Some(Section::Usdinr),
            "Indian_Equity_Indices" => Some(Section::Indices),
            "FPI/DII_Activity" => Some(Section::FpiDii),
            "Technical_Pulse" => Some(Section::Technical),
            "Last_Updated" => Some(Section::LastUpdated),
            _ => None,
        }
    }
}

/// Everything read from the market-data resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketDataFile {
    pub comments: CommentsBundle,
    pub nifty: Option<Quote>,
    pub bank_nifty: Option<Quote>,
    pub last_updated: Option<String>,
}

impl MarketDataFile {
    /// Index quote by display name
    pub fn index(&self, name: &str) -> Option<&Quote> {
        match name {
            NIFTY_50 => self.nifty.as_ref(),
            BANK_NIFTY => self.bank_nifty.as_ref(),
            _ => None,
        }
    }
}

/// `name,price,change[,direction]`
///
/// The change is the field ending in `%`; everything between the name and
/// the change is the price, so `24,350` keeps its separator.
fn index_row(line: &str) -> Option<(&str, Quote)> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let (rest, direction) = match fields.as_slice() {
        [rest @ .., last] if last.ends_with('%') => (rest, Direction::Neutral),
        [rest @ .., direction] => (rest, Direction::parse_lenient(direction)),
        [] => return None,
    };
    let [name, price @ .., change] = rest else {
        return None;
    };
    if price.is_empty() {
        return None;
    }
    Some((*name, Quote::new(price.join(","), *change, direction)))
}

/// `label,value,note,direction`
///
/// Extra fields belong to the value, so `+₹2,100 Cr` keeps its
/// thousands separator.
fn fpi_dii_row(line: &str) -> Option<[String; 4]> {
    let fields: Vec<&str> = line.split(',').collect();
    let [label, middle @ .., note, direction] = fields.as_slice() else {
        return None;
    };
    if middle.is_empty() {
        return None;
    }
    Some([
        label.trim().to_string(),
        middle.join(",").trim().to_string(),
        note.trim().to_string(),
        direction.trim().to_string(),
    ])
}

fn set_once(slot: &mut String, line: &str) {
    if slot.is_empty() {
        *slot = line.to_string();
    }
}

/// Parse the commentary file.
///
/// Lines before the first section header and unknown lines are ignored.
/// `FX_Majors` content is ignored too, majors always come from live rates.
/// When an index appears twice the later row wins.
pub fn parse_market_data(text: &str) -> Result<MarketDataFile> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty("market data"));
    }

    let mut file = MarketDataFile::default();
    let mut section = None;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(next) = Section::from_header(line) {
            section = Some(next);
            continue;
        }

        match section {
            Some(Section::DollarIndex) => set_once(&mut file.comments.dxy, line),
            Some(Section::Usdinr) => set_once(&mut file.comments.usdinr, line),
            Some(Section::Indices) if !line.contains(',') => {
                set_once(&mut file.comments.indices, line)
            }
            Some(Section::Indices) => match index_row(line) {
                Some((NIFTY_50, quote)) => file.nifty = Some(quote),
                Some((BANK_NIFTY, quote)) => file.bank_nifty = Some(quote),
                _ => {}
            },
            Some(Section::Technical) => file.comments.technical.push(line.to_string()),
            Some(Section::FpiDii) => {
                if let Some(row) = fpi_dii_row(line) {
                    file.comments.fpidii.push(row);
                }
            }
            Some(Section::LastUpdated) => {
                if file.last_updated.is_none() {
                    file.last_updated = Some(line.to_string());
                }
            }
            Some(Section::FxMajors) | None => {}
        }
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comments::TechnicalLine;

    const SAMPLE: &str = "\
Market notes for the desk
FX_Majors
EURUSD,1.0850,+0.10%,up
Dollar_Index
DXY steady ahead of US data.
A second line that is ignored.
USDINR
Rupee holds 83.10.
Indian_Equity_Indices
Indices consolidate near highs.
Nifty 50,24350,+0.45%,up
Bank Nifty,51200,-0.12%
Sensex,80000,+0.3%,up
FPI/DII_Activity
FPI (Net),+₹2,100 Cr,Buying,up
short,row
Technical_Pulse
Nifty: support at 24,100
Watch the open

Last_Updated
13 Oct 2025, 6:00 pm
";

    #[test]
    fn test_sections() {
        let file = parse_market_data(SAMPLE).unwrap();
        let comments = &file.comments;

        assert_eq!(comments.dxy, "DXY steady ahead of US data.");
        assert_eq!(comments.usdinr, "Rupee holds 83.10.");
        assert_eq!(comments.indices, "Indices consolidate near highs.");
        assert_eq!(file.last_updated.as_deref(), Some("13 Oct 2025, 6:00 pm"));
    }

    #[test]
    fn test_index_rows() {
        let file = parse_market_data(SAMPLE).unwrap();
        assert_eq!(file.nifty, Some(Quote::new("24350", "+0.45%", Direction::Up)));
        // missing direction defaults to neutral
        assert_eq!(
            file.index(BANK_NIFTY),
            Some(&Quote::new("51200", "-0.12%", Direction::Neutral))
        );
        assert_eq!(file.index("Sensex"), None);
    }

    #[test]
    fn test_index_price_keeps_grouping() {
        let file = parse_market_data(
            "Indian_Equity_Indices\nNifty 50,24,350,+0.45%,up\nBank Nifty,51,200.50,-0.12%\n",
        )
        .unwrap();
        assert_eq!(file.nifty, Some(Quote::new("24,350", "+0.45%", Direction::Up)));
        assert_eq!(
            file.bank_nifty,
            Some(Quote::new("51,200.50", "-0.12%", Direction::Neutral))
        );
    }

    #[test]
    fn test_index_row_too_short() {
        let file =
            parse_market_data("Indian_Equity_Indices\nNifty 50,+0.45%\nBank Nifty,up\n").unwrap();
        assert_eq!(file.nifty, None);
        assert_eq!(file.bank_nifty, None);
    }

    #[test]
    fn test_fpi_dii_rows() {
        let file = parse_market_data(SAMPLE).unwrap();
        assert_eq!(file.comments.fpidii.len(), 1);
        assert_eq!(
            file.comments.fpidii[0],
            [
                "FPI (Net)".to_string(),
                "+₹2,100 Cr".to_string(),
                "Buying".to_string(),
                "up".to_string(),
            ]
        );
        assert_eq!(fpi_dii_row("a,b,c"), None);
    }

    #[test]
    fn test_technical_lines_kept_in_order() {
        let file = parse_market_data(SAMPLE).unwrap();
        assert_eq!(
            file.comments.technical_lines(),
            vec![
                TechnicalLine::Labeled {
                    label: "Nifty".to_string(),
                    text: "support at 24,100".to_string(),
                },
                TechnicalLine::Plain {
                    text: "Watch the open".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_later_index_row_wins() {
        let text = "Indian_Equity_Indices\nNifty 50,24000,+0.1%,up\nNifty 50,24100,+0.5%,up";
        let file = parse_market_data(text).unwrap();
        assert_eq!(file.nifty.map(|q| q.price), Some("24100".to_string()));
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(
            parse_market_data("\n \n").unwrap_err(),
            ParseError::Empty("market data")
        );
    }
}
