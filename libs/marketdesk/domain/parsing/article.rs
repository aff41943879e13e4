//! Article teaser parsing: `title,excerpt[,link][,YYYY-MM-DD]`

use super::{has_iso_date_shape, parse_iso_date, records, ParseError, Result};
use crate::domain::content::ArticleEntry;
use chrono::{Duration, NaiveDate};
use tracing::debug;

fn is_link(field: &str) -> bool {
    field.starts_with("http://") || field.starts_with("https://")
}

/// Fallback badge date for the `index`-th article
fn fallback_date(today: NaiveDate, index: usize) -> NaiveDate {
    let days_back = 15 - 5 * index as i64;
    today - Duration::days(days_back)
}

/// Parse article teasers.
///
/// Trailing fields are peeled off from the right: a date-shaped field
/// first, then an `http(s)://` field. Whatever sits between the title and
/// those is the excerpt, commas included. Articles without a usable date
/// get `today - (15 - 5 * index)` days.
pub fn parse_articles(text: &str, today: NaiveDate) -> Result<Vec<ArticleEntry>> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty("article list"));
    }

    let mut articles = Vec::new();
    let mut skipped = 0;

    for (line_no, line) in records(text) {
        let mut fields: Vec<&str> = line.split(',').collect();
        let title = fields.remove(0).trim();
        if title.is_empty() || fields.is_empty() {
            debug!(line_no, "Skipping article line without title and excerpt");
            skipped += 1;
            continue;
        }

        let mut date = None;
        if fields.len() > 1 {
            if let Some(last) = fields.last().copied().map(str::trim) {
                if has_iso_date_shape(last) {
                    date = parse_iso_date(last);
                    fields.pop();
                }
            }
        }

        let mut link = None;
        if fields.len() > 1 {
            if let Some(last) = fields.last().copied().map(str::trim) {
                if is_link(last) {
                    link = Some(last.to_string());
                    fields.pop();
                }
            }
        }

        let excerpt = fields.join(",").trim().to_string();
        let date = date.unwrap_or_else(|| fallback_date(today, articles.len()));

        articles.push(ArticleEntry {
            title: title.to_string(),
            excerpt,
            link,
            date,
        });
    }

    if articles.is_empty() {
        return Err(ParseError::NoValidRecords {
            resource: "article list",
            skipped,
        });
    }

    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_all_fields() {
        let text = "Rupee outlook,Range trade likely,https://x.test/a,2025-10-10";
        let articles = parse_articles(text, date(2025, 10, 13)).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Rupee outlook");
        assert_eq!(articles[0].excerpt, "Range trade likely");
        assert_eq!(articles[0].link.as_deref(), Some("https://x.test/a"));
        assert_eq!(articles[0].date, date(2025, 10, 10));
    }

    #[test]
    fn test_excerpt_keeps_commas() {
        let text = "Flows,FPIs sold, DIIs bought, market flat,2025-10-01";
        let articles = parse_articles(text, date(2025, 10, 13)).unwrap();
        assert_eq!(articles[0].excerpt, "FPIs sold, DIIs bought, market flat");
        assert_eq!(articles[0].link, None);
    }

    #[test]
    fn test_missing_or_invalid_date_uses_index_fallback() {
        let today = date(2025, 10, 13);
        let text = "One,first\nTwo,second,2025-02-30\nThree,third";
        let articles = parse_articles(text, today).unwrap();
        assert_eq!(articles[0].date, date(2025, 9, 28));
        assert_eq!(articles[1].date, date(2025, 10, 3));
        assert_eq!(articles[1].excerpt, "second");
        assert_eq!(articles[2].date, date(2025, 10, 8));
    }

    #[test]
    fn test_lines_without_excerpt_are_skipped() {
        let articles = parse_articles("Lonely title\n,no title\nOk,fine", date(2025, 1, 1)).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Ok");
    }

    #[test]
    fn test_link_only_excerpt_is_not_consumed() {
        // a lone second field is always the excerpt
        let articles = parse_articles("Title,https://x.test", date(2025, 1, 1)).unwrap();
        assert_eq!(articles[0].excerpt, "https://x.test");
        assert_eq!(articles[0].link, None);
    }

    #[test]
    fn test_empty_resource() {
        assert_eq!(
            parse_articles("\n", date(2025, 1, 1)).unwrap_err(),
            ParseError::Empty("article list")
        );
    }
}
