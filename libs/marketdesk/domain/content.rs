//! Content records parsed from the site's text resources

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const YOUTUBE_THUMB_URL: &str = "https://img.youtube.com/vi";

/// A video from `videos.txt`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    /// 11-character YouTube video ID
    pub video_id: String,
    pub title: String,
}

impl VideoEntry {
    pub fn new(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            title: title.into(),
        }
    }

    pub fn watch_url(&self) -> String {
        format!("{}{}", YOUTUBE_WATCH_URL, self.video_id)
    }

    pub fn thumbnail_url(&self) -> String {
        format!("{}/{}/hqdefault.jpg", YOUTUBE_THUMB_URL, self.video_id)
    }
}

/// An article teaser from `articles.txt`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleEntry {
    pub title: String,
    pub excerpt: String,
    pub link: Option<String>,
    pub date: NaiveDate,
}

impl ArticleEntry {
    /// Day of month, as shown in the date badge
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Abbreviated month, as shown in the date badge
    pub fn month_short(&self) -> String {
        self.date.format("%b").to_string()
    }
}

/// Document category, derived from the URL extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Spreadsheet,
    Word,
    Slides,
    Link,
}

impl DocumentKind {
    pub fn from_url(url: &str) -> Self {
        let path = url
            .split(['?', '#'])
            .next()
            .unwrap_or(url)
            .to_ascii_lowercase();
        let ext = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");

        match ext {
            "pdf" => DocumentKind::Pdf,
            "xlsx" | "xls" | "csv" => DocumentKind::Spreadsheet,
            "doc" | "docx" => DocumentKind::Word,
            "ppt" | "pptx" => DocumentKind::Slides,
            _ => DocumentKind::Link,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Spreadsheet => "spreadsheet",
            DocumentKind::Word => "word",
            DocumentKind::Slides => "slides",
            DocumentKind::Link => "link",
        }
    }
}

/// A downloadable document from `documents.txt`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub title: String,
    pub url: String,
    pub kind: DocumentKind,
}

impl DocumentEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: title.into(),
            kind: DocumentKind::from_url(&url),
            url,
        }
    }
}

/// One rendered line of a daily update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum UpdateLine {
    Break,
    Bullet(String),
    Subheading(String),
    Paragraph(String),
}

/// A dated block from `daily-updates.txt`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUpdate {
    pub date: NaiveDate,
    pub lines: Vec<UpdateLine>,
}

impl DailyUpdate {
    /// Header title relative to `today`
    pub fn title(&self, today: NaiveDate) -> &'static str {
        if self.date == today {
            "Today's Market Update"
        } else if today.pred_opt() == Some(self.date) {
            "Yesterday's Market Update"
        } else {
            "Market Update"
        }
    }

    /// Long date, e.g. `Monday, 13 October 2025`
    pub fn formatted_date(&self) -> String {
        self.date.format("%A, %-d %B %Y").to_string()
    }
}
