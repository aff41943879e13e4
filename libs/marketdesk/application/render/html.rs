//! HTML fragments for the page containers
//!
//! Every function returns the inner HTML of one container. Class names are
//! the ones the site stylesheet targets. All text is escaped.

use crate::application::content_loader::ContentOutcome;
use crate::domain::{
    ArticleEntry, CommentsBundle, DailyUpdate, DocumentEntry, FxPanel, MarketSnapshot, Quote,
    QuoteOrigin, QuoteState, TechnicalLine, UpdateLine, VideoEntry,
};
use chrono::NaiveDate;

pub const DXY_UNAVAILABLE: &str = "DXY data unavailable";
pub const USDINR_UNAVAILABLE: &str = "USDINR data unavailable";
pub const INDICES_UNAVAILABLE: &str = "Indices data unavailable - please update market-data.txt";
pub const LIVE_DATA_NOTE: &str = "Live data updated";

const FALLBACK_NOTICE: &str = "Using fallback embedded list. Changes to the video list will not \
                               be reflected until the file loads successfully.";

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn error_div(message: &str) -> String {
    format!(r#"<div class="error">{}</div>"#, escape(message))
}

fn content_error_div(message: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!(
            r#"<div class="error">{} Error: {}</div>"#,
            escape(message),
            escape(detail)
        ),
        None => error_div(message),
    }
}

// ---------------------------------------------------------------------------
// Market panel
// ---------------------------------------------------------------------------

fn market_item(label: &str, quote: &Quote, highlight: bool) -> String {
    let class = if highlight {
        "market-item highlight"
    } else {
        "market-item"
    };
    format!(
        r#"<div class="{}"><span class="market-pair">{}</span><span class="market-price {}">{}</span><span class="market-change">{}</span></div>"#,
        class,
        escape(label),
        quote.direction.as_str(),
        escape(&quote.price),
        escape(&quote.change),
    )
}

fn market_comment(comment: &str) -> String {
    if comment.trim().is_empty() {
        String::new()
    } else {
        format!(r#"<p class="market-comment">{}</p>"#, escape(comment))
    }
}

fn section(title: &str, body: &str) -> String {
    format!(
        r#"<div class="market-section"><h3>{}</h3>{}</div>"#,
        escape(title),
        body
    )
}

fn origin_note(origin: Option<&QuoteOrigin>) -> String {
    match origin {
        Some(QuoteOrigin::Approximation) => {
            r#"<p class="market-source">Approximated from FX rates</p>"#.to_string()
        }
        Some(QuoteOrigin::LocalFile) => {
            r#"<p class="market-source">From market-data file</p>"#.to_string()
        }
        _ => String::new(),
    }
}

pub fn fx_majors_section(panel: &FxPanel) -> String {
    let body = match panel {
        FxPanel::Loaded { majors, .. } => majors
            .rows()
            .iter()
            .map(|(pair, quote)| market_item(pair, quote, false))
            .collect::<String>(),
        FxPanel::Unavailable { .. } => error_div("FX data unavailable"),
    };
    section("FX Majors", &body)
}

/// Single-quote section: the highlighted item plus its comment, or the
/// placeholder when the quote failed
fn single_quote_section(
    title: &str,
    label: &str,
    state: &QuoteState,
    comment: &str,
    unavailable: &str,
) -> String {
    let body = match state.quote() {
        Some(quote) => format!(
            "{}{}{}",
            market_item(label, quote, true),
            market_comment(comment),
            origin_note(state.origin())
        ),
        None => error_div(unavailable),
    };
    section(title, &body)
}

pub fn usdinr_section(state: &QuoteState, comments: &CommentsBundle) -> String {
    single_quote_section("USDINR", "USD/INR", state, &comments.usdinr, USDINR_UNAVAILABLE)
}

pub fn dollar_index_section(state: &QuoteState, comments: &CommentsBundle) -> String {
    single_quote_section("Dollar Index", "DXY", state, &comments.dxy, DXY_UNAVAILABLE)
}

/// Both indices in one section. One missing index gets its own placeholder;
/// both missing collapse into the section-wide message.
pub fn indices_section(nifty: &QuoteState, bank_nifty: &QuoteState, comments: &CommentsBundle) -> String {
    let indices = [("Nifty 50", nifty), ("Bank Nifty", bank_nifty)];

    if indices.iter().all(|(_, state)| state.quote().is_none()) {
        return section("Indian Equity Indices", &error_div(INDICES_UNAVAILABLE));
    }

    let mut body = String::new();
    for (name, state) in indices {
        match state.quote() {
            Some(quote) => body.push_str(&market_item(name, quote, false)),
            None => body.push_str(&error_div(&format!("{name} unavailable"))),
        }
    }
    body.push_str(&market_comment(&comments.indices));
    section("Indian Equity Indices", &body)
}

pub fn fpi_dii_section(comments: &CommentsBundle) -> String {
    let body: String = comments
        .fpi_dii_rows()
        .iter()
        .map(|row| {
            format!(
                r#"<div class="market-item"><span class="market-pair">{}</span><span class="market-price {}">{}</span><span class="market-change">{}</span></div>"#,
                escape(&row.label),
                row.direction.as_str(),
                escape(&row.value),
                escape(&row.note),
            )
        })
        .collect();
    section("FPI/DII Activity", &body)
}

/// A commentary line: bold label before the first colon, or plain text
pub fn technical_line(line: &TechnicalLine) -> String {
    match line {
        TechnicalLine::Labeled { label, text } => {
            format!("<p><strong>{}:</strong> {}</p>", escape(label), escape(text))
        }
        TechnicalLine::Plain { text } => format!("<p>{}</p>", escape(text)),
    }
}

pub fn technical_section(comments: &CommentsBundle) -> String {
    let lines: String = comments.technical_lines().iter().map(technical_line).collect();
    format!(
        r#"<div class="market-section full-width"><h3>Technical Pulse</h3><div class="technical-view">{}</div></div>"#,
        lines
    )
}

/// Content of `daily-market-container`
pub fn market_panel(snapshot: &MarketSnapshot) -> String {
    let comments = snapshot.comments_or_default();
    [
        fx_majors_section(&snapshot.fx_majors),
        usdinr_section(&snapshot.usdinr, &comments),
        dollar_index_section(&snapshot.dollar_index, &comments),
        indices_section(&snapshot.nifty, &snapshot.bank_nifty, &comments),
        fpi_dii_section(&comments),
        technical_section(&comments),
    ]
    .concat()
}

/// Content of `daily-update-container`
pub fn update_stamp(snapshot: &MarketSnapshot) -> String {
    let mut html = format!(
        r#"<span id="update-time-text">{}</span> <span id="update-note-text">{}</span>"#,
        escape(&snapshot.captured_label()),
        LIVE_DATA_NOTE
    );
    if let Some(label) = &snapshot.last_updated {
        html.push_str(&format!(
            r#" <span class="update-commentary-date">Commentary: {}</span>"#,
            escape(label)
        ));
    }
    html
}

// ---------------------------------------------------------------------------
// Content panels
// ---------------------------------------------------------------------------

pub fn video_item(video: &VideoEntry) -> String {
    let title = escape(&video.title);
    format!(
        concat!(
            r#"<div class="video-item" data-video-id="{id}">"#,
            r#"<div class="video-player-wrapper">"#,
            r#"<a class="video-thumbnail-wrapper" href="{watch}" target="_blank" rel="noopener">"#,
            r#"<img src="{thumb}" alt="{title}" class="youtube-thumbnail" loading="lazy">"#,
            r#"<div class="play-overlay"><div class="play-button"></div></div>"#,
            r#"</a></div>"#,
            r#"<div class="video-title-container"><h3 class="video-title-display">{title}</h3></div>"#,
            r#"</div>"#,
        ),
        id = escape(&video.video_id),
        watch = escape(&video.watch_url()),
        thumb = escape(&video.thumbnail_url()),
        title = title,
    )
}

/// Content of `videos-container`
pub fn videos_panel(outcome: &ContentOutcome<Vec<VideoEntry>>) -> String {
    match outcome {
        ContentOutcome::Loaded { items } => items.iter().map(video_item).collect(),
        ContentOutcome::Fallback { items, reason } => {
            let mut html = format!(
                r#"<div class="error">{} <br><br><strong>{}</strong></div>"#,
                escape(reason),
                FALLBACK_NOTICE
            );
            html.extend(items.iter().map(video_item));
            html
        }
        ContentOutcome::Unavailable { message, detail } => {
            content_error_div(message, detail.as_deref())
        }
    }
}

pub fn article_item(article: &ArticleEntry) -> String {
    let link = article
        .link
        .as_ref()
        .map(|link| {
            format!(
                r#"<p><a href="{}" target="_blank" class="read-full-article">Read Full Article →</a></p>"#,
                escape(link)
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            r#"<article class="article-item">"#,
            r#"<div class="article-date"><span class="date-day">{day}</span><span class="date-month">{month}</span></div>"#,
            r#"<div class="article-content-wrapper"><h3>{title}</h3>"#,
            r#"<p class="article-excerpt">{excerpt}</p>"#,
            r#"<div class="article-full-content">{link}</div>"#,
            r#"</div></article>"#,
        ),
        day = article.day(),
        month = article.month_short(),
        title = escape(&article.title),
        excerpt = escape(&article.excerpt),
        link = link,
    )
}

/// Content of `articles-container`
pub fn articles_panel(outcome: &ContentOutcome<Vec<ArticleEntry>>) -> String {
    match outcome.items() {
        Some(items) => items.iter().map(article_item).collect(),
        None => unavailable(outcome),
    }
}

pub fn document_item(document: &DocumentEntry) -> String {
    let kind = document.kind.as_str();
    format!(
        r#"<div class="document-item document-{kind}"><a href="{}" target="_blank" rel="noopener" class="document-link"><span class="document-kind">{}</span><span class="document-title">{}</span></a></div>"#,
        escape(&document.url),
        kind.to_uppercase(),
        escape(&document.title),
    )
}

/// Content of `documents-container`
pub fn documents_panel(outcome: &ContentOutcome<Vec<DocumentEntry>>) -> String {
    match outcome.items() {
        Some(items) => items.iter().map(document_item).collect(),
        None => unavailable(outcome),
    }
}

pub fn update_line(line: &UpdateLine) -> String {
    match line {
        UpdateLine::Break => "<br>".to_string(),
        UpdateLine::Bullet(text) => format!(r#"<p class="update-bullet">{}</p>"#, escape(text)),
        UpdateLine::Subheading(text) => {
            format!(r#"<h4 class="update-subheading">{}</h4>"#, escape(text))
        }
        UpdateLine::Paragraph(text) => format!("<p>{}</p>", escape(text)),
    }
}

pub fn daily_update_card(update: &DailyUpdate, today: NaiveDate) -> String {
    let content: String = update.lines.iter().map(update_line).collect();
    format!(
        concat!(
            r#"<div class="daily-update-card">"#,
            r#"<div class="update-header"><h3>{}</h3><span class="update-date">{}</span></div>"#,
            r#"<div class="update-content">{}</div>"#,
            r#"</div>"#,
        ),
        update.title(today),
        escape(&update.formatted_date()),
        content,
    )
}

/// Content of `daily-updates-container`
pub fn daily_updates_panel(outcome: &ContentOutcome<Vec<DailyUpdate>>, today: NaiveDate) -> String {
    match outcome {
        ContentOutcome::Unavailable { message, detail } => {
            let detail = detail
                .as_deref()
                .map(|d| format!(r#"<p class="error-detail">Error: {}</p>"#, escape(d)))
                .unwrap_or_default();
            format!(
                r#"<div class="error-message"><p>{}</p>{}</div>"#,
                escape(message),
                detail
            )
        }
        _ => outcome
            .items()
            .map(|items| items.iter().map(|u| daily_update_card(u, today)).collect())
            .unwrap_or_default(),
    }
}

fn unavailable<T>(outcome: &ContentOutcome<T>) -> String {
    match outcome {
        ContentOutcome::Unavailable { message, detail } => {
            content_error_div(message, detail.as_deref())
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, FxMajors, UsdRates};
    use chrono::{FixedOffset, TimeZone};
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn succeeded(quote: Quote, origin: QuoteOrigin) -> QuoteState {
        let mut state = QuoteState::default();
        state.start().unwrap();
        state.succeed(quote, origin).unwrap();
        state
    }

    fn failed() -> QuoteState {
        let mut state = QuoteState::default();
        state.start().unwrap();
        state.fall_back("timeout").unwrap();
        state.fail("no row").unwrap();
        state
    }

    fn snapshot() -> MarketSnapshot {
        let rates = UsdRates::new(HashMap::from([
            ("EUR".to_string(), 0.92),
            ("GBP".to_string(), 0.79),
            ("JPY".to_string(), 149.5),
            ("CHF".to_string(), 0.88),
            ("INR".to_string(), 83.12),
        ]));
        MarketSnapshot {
            fx_majors: FxPanel::Loaded {
                majors: FxMajors::from_rates(&rates).unwrap(),
                source: "exchangerate-api".to_string(),
            },
            dollar_index: failed(),
            usdinr: succeeded(
                rates.usd_inr().unwrap(),
                QuoteOrigin::Network("exchangerate-api".to_string()),
            ),
            nifty: succeeded(
                Quote::new("24,350", "+0.62%", Direction::Up),
                QuoteOrigin::LocalFile,
            ),
            bank_nifty: failed(),
            comments: None,
            last_updated: Some("16 Oct 2026".to_string()),
            captured_at: FixedOffset::east_opt(19_800)
                .unwrap()
                .with_ymd_and_hms(2026, 10, 16, 9, 15, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"R&D" 'x'</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot; &#39;x&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_market_panel_section_order() {
        let html = market_panel(&snapshot());
        let order = [
            "FX Majors",
            "USDINR",
            "Dollar Index",
            "Indian Equity Indices",
            "FPI/DII Activity",
            "Technical Pulse",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|title| html.find(&format!("<h3>{title}</h3>")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_failed_quotes_show_placeholders() {
        let html = market_panel(&snapshot());
        assert!(html.contains(&format!(r#"<div class="error">{DXY_UNAVAILABLE}</div>"#)));
        assert!(html.contains(r#"<div class="error">Bank Nifty unavailable</div>"#));
        assert!(html.contains(r#"<span class="market-price up">24,350</span>"#));
        assert!(html.contains("From market-data file"));
    }

    #[test]
    fn test_both_indices_missing() {
        let html = indices_section(&failed(), &failed(), &CommentsBundle::default());
        assert!(html.contains(INDICES_UNAVAILABLE));
        assert!(!html.contains("market-item"));
    }

    #[test]
    fn test_default_commentary() {
        let html = market_panel(&snapshot());
        assert!(html.contains(r#"<span class="market-pair">FPI (Net)</span>"#));
        assert!(html.contains("<p><strong>Nifty:</strong> Trading above key support"));
    }

    #[test]
    fn test_technical_line_forms() {
        let labeled = TechnicalLine::parse("Support: 22,200: firm").unwrap();
        assert_eq!(
            technical_line(&labeled),
            "<p><strong>Support:</strong> 22,200: firm</p>"
        );

        let plain = TechnicalLine::parse("Range-bound session").unwrap();
        assert_eq!(technical_line(&plain), "<p>Range-bound session</p>");
    }

    #[test]
    fn test_update_stamp() {
        let html = update_stamp(&snapshot());
        assert!(html.contains("16 Oct 2026, 09:15:00 am IST"));
        assert!(html.contains(LIVE_DATA_NOTE));
        assert!(html.contains("Commentary: 16 Oct 2026"));
    }

    #[test]
    fn test_video_fallback_notice() {
        let outcome = ContentOutcome::Fallback {
            items: vec![VideoEntry::new("sGTE5cCSS5A", "Daily Market Analysis")],
            reason: "Error loading videos.txt: HTTP 404".to_string(),
        };
        let html = videos_panel(&outcome);
        assert!(html.starts_with(r#"<div class="error">Error loading videos.txt"#));
        assert!(html.contains("Using fallback embedded list"));
        assert_eq!(html.matches(r#"class="video-item""#).count(), 1);
    }

    #[test]
    fn test_article_badge_and_link() {
        let article = ArticleEntry {
            title: "Rupee outlook".to_string(),
            excerpt: "RBI & flows".to_string(),
            link: Some("https://desk.test/a".to_string()),
            date: date(2026, 10, 3),
        };
        let html = article_item(&article);
        assert!(html.contains(r#"<span class="date-day">3</span><span class="date-month">Oct</span>"#));
        assert!(html.contains("RBI &amp; flows"));
        assert!(html.contains("Read Full Article →"));

        let no_link = ArticleEntry { link: None, ..article };
        assert!(!article_item(&no_link).contains("read-full-article"));
    }

    #[test]
    fn test_document_item() {
        let html = document_item(&DocumentEntry::new("Outlook", "docs/outlook.pdf"));
        assert!(html.contains("document-item document-pdf"));
        assert!(html.contains(r#"href="docs/outlook.pdf""#));
    }

    #[test]
    fn test_daily_updates_rendering() {
        let update = DailyUpdate {
            date: date(2026, 10, 16),
            lines: vec![
                UpdateLine::Subheading("Key Highlights".to_string()),
                UpdateLine::Bullet("Nifty up".to_string()),
                UpdateLine::Break,
                UpdateLine::Paragraph("Close".to_string()),
            ],
        };
        let outcome = ContentOutcome::Loaded { items: vec![update] };
        let html = daily_updates_panel(&outcome, date(2026, 10, 16));
        assert!(html.contains("<h3>Today's Market Update</h3>"));
        assert!(html.contains("Friday, 16 October 2026"));
        assert!(html.contains(r#"<h4 class="update-subheading">Key Highlights</h4>"#));
        assert!(html.contains(r#"<p class="update-bullet">Nifty up</p><br><p>Close</p>"#));
    }

    #[test]
    fn test_daily_updates_error_detail() {
        let outcome: ContentOutcome<Vec<DailyUpdate>> = ContentOutcome::Unavailable {
            message: "Unable to load daily updates. Error: see below.".to_string(),
            detail: Some("HTTP 404".to_string()),
        };
        let html = daily_updates_panel(&outcome, date(2026, 10, 16));
        assert_eq!(
            html,
            r#"<div class="error-message"><p>Unable to load daily updates. Error: see below.</p><p class="error-detail">Error: HTTP 404</p></div>"#
        );

        let bare: ContentOutcome<Vec<DailyUpdate>> = ContentOutcome::Unavailable {
            message: "Unable to load daily updates.".to_string(),
            detail: None,
        };
        assert!(!daily_updates_panel(&bare, date(2026, 10, 16)).contains("error-detail"));
    }

    #[test]
    fn test_unavailable_panel_shows_detail() {
        let outcome: ContentOutcome<Vec<ArticleEntry>> = ContentOutcome::Unavailable {
            message: "Unable to load articles from articles.txt.".to_string(),
            detail: Some("HTTP <503>".to_string()),
        };
        assert_eq!(
            articles_panel(&outcome),
            r#"<div class="error">Unable to load articles from articles.txt. Error: HTTP &lt;503&gt;</div>"#
        );
    }
}
