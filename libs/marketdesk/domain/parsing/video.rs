//! Video list parsing
//!
//! One record per line: `title,url` or a bare `url`. Everything after the
//! first comma is the URL, so URLs containing commas survive.

use super::{records, ParseError, Result, SkippedLine};
use crate::domain::content::VideoEntry;

const VIDEO_ID_LEN: usize = 11;

/// URL prefixes that are directly followed by the video ID
const ID_MARKERS: [&str; 4] = [
    "youtube.com/watch?v=",
    "youtu.be/",
    "youtube.com/embed/",
    "youtube.com/v/",
];

/// Parsed videos plus the lines that were dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoList {
    pub entries: Vec<VideoEntry>,
    pub skipped: Vec<SkippedLine>,
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN && s.chars().all(is_id_char)
}

/// Text up to the first `&`, `?`, `#` or newline
fn id_segment(s: &str) -> &str {
    let end = s.find(['&', '?', '#', '\n']).unwrap_or(s.len());
    &s[..end]
}

/// `watch?v=`, `youtu.be/`, `embed/` or `v/`, whichever appears first
fn id_after_marker(url: &str) -> Option<&str> {
    let (pos, marker) = ID_MARKERS
        .iter()
        .filter_map(|marker| url.find(*marker).map(|pos| (pos, *marker)))
        .min_by_key(|(pos, _)| *pos)?;
    let segment = id_segment(&url[pos + marker.len()..]).trim();
    is_video_id(segment).then_some(segment)
}

/// Last `v=` anywhere in a `youtube.com/watch?` query
fn id_from_watch_query(url: &str) -> Option<&str> {
    const WATCH: &str = "youtube.com/watch?";
    let start = url.find(WATCH)? + WATCH.len();
    let query = &url[start..];
    let pos = query.rfind("v=")?;
    let segment = id_segment(&query[pos + 2..]).trim();
    is_video_id(segment).then_some(segment)
}

/// Eleven ID characters after the rightmost usable `/` of a youtube.com path
fn id_from_path(url: &str) -> Option<&str> {
    const HOST: &str = "youtube.com/";
    let start = url.find(HOST)? + HOST.len();
    let path = &url[start..];

    path.match_indices('/').rev().find_map(|(slash, _)| {
        let candidate = path.get(slash + 1..slash + 1 + VIDEO_ID_LEN)?;
        candidate.chars().all(is_id_char).then_some(candidate)
    })
}

/// Extract an 11-character YouTube video ID from a URL or a bare ID.
///
/// Patterns are tried in order; a pattern that matches but yields a
/// malformed ID does not stop the next one from being tried.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    id_after_marker(url)
        .or_else(|| id_from_watch_query(url))
        .or_else(|| id_from_path(url))
        .or_else(|| is_video_id(url).then_some(url))
        .map(str::to_string)
}

/// Parse a video list.
///
/// Distinguishes an empty resource from one where no line held a valid
/// video ID. Titles default to `Video N`, N counting valid entries only.
pub fn parse_video_list(text: &str) -> Result<VideoList> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty("video list"));
    }

    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for (line_no, line) in records(text) {
        let (title, url) = match line.split_once(',') {
            Some((title, url)) => (title.trim(), url.trim()),
            None => ("", line),
        };

        let Some(video_id) = extract_video_id(url) else {
            skipped.push(SkippedLine::new(line_no, line, "no valid video id"));
            continue;
        };

        let title = if title.is_empty() {
            format!("Video {}", entries.len() + 1)
        } else {
            title.to_string()
        };
        entries.push(VideoEntry::new(video_id, title));
    }

    if entries.is_empty() {
        return Err(ParseError::NoValidRecords {
            resource: "video list",
            skipped: skipped.len(),
        });
    }

    Ok(VideoList { entries, skipped })
}
