//! Document list parsing: `title,url` per line

use super::{records, ParseError, Result};
use crate::domain::content::DocumentEntry;
use tracing::debug;

/// `http(s)://` or a relative path without whitespace or another scheme
fn is_document_url(url: &str) -> bool {
    if url.is_empty() || url.chars().any(char::is_whitespace) {
        return false;
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return true;
    }
    !url.contains("://") && !url.starts_with("javascript:")
}

/// Last path segment, used as the title of a bare URL line
fn file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(url)
}

pub fn parse_documents(text: &str) -> Result<Vec<DocumentEntry>> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty("document list"));
    }

    let mut documents = Vec::new();
    let mut skipped = 0;

    for (line_no, line) in records(text) {
        let (title, url) = match line.split_once(',') {
            Some((title, url)) => (title.trim(), url.trim()),
            None => ("", line),
        };

        if !is_document_url(url) {
            debug!(line_no, url, "Skipping document with unusable URL");
            skipped += 1;
            continue;
        }

        let title = if title.is_empty() { file_name(url) } else { title };
        documents.push(DocumentEntry::new(title, url));
    }

    if documents.is_empty() {
        return Err(ParseError::NoValidRecords {
            resource: "document list",
            skipped,
        });
    }

    Ok(documents)
}
