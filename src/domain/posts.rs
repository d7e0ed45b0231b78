//! Post snapshots as returned by the blog API, plus the list helpers shared by every view:
//! tag vocabulary, text filtering and page slicing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

use super::error::DomainError;

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

/// Image shown as the card thumbnail and the detail banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Media {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Read-only snapshot of a remote post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Rich HTML produced by the editor widget.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated: Option<OffsetDateTime>,
    #[serde(default)]
    pub author: Option<Author>,
}

impl Post {
    pub fn image_url(&self) -> Option<&str> {
        self.media
            .as_ref()
            .map(|media| media.url.as_str())
            .filter(|url| !url.trim().is_empty())
    }

    pub fn published_label(&self) -> String {
        human_date(self.created)
    }

    /// Case-insensitive substring match against the title or any tag.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// Payload for create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl PostDraft {
    /// Build a draft from raw form fields. A blank image url drops the media entry.
    pub fn from_form(title: &str, body: &str, image_url: &str, tags: &str) -> Self {
        let image_url = image_url.trim();
        Self {
            title: title.trim().to_string(),
            body: Some(body.to_string()).filter(|body| !body.trim().is_empty()),
            media: (!image_url.is_empty()).then(|| Media::from_url(image_url)),
            tags: parse_tags(tags),
        }
    }

    pub fn ensure_publishable(&self) -> Result<(), DomainError> {
        let has_body = self.body.as_deref().is_some_and(|body| !body.trim().is_empty());
        if self.title.trim().is_empty() || !has_body {
            return Err(DomainError::validation("Title and body are required."));
        }
        Ok(())
    }
}

pub fn human_date(value: OffsetDateTime) -> String {
    value
        .date()
        .format(HUMAN_DATE_FORMAT)
        .unwrap_or_else(|_| value.date().to_string())
}

/// Split comma-separated tag input, trimming each entry and dropping blanks.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Every tag used across `posts`, in first-occurrence order, without duplicates.
pub fn unique_tags(posts: &[Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for tag in posts.iter().flat_map(|post| &post.tags) {
        if seen.insert(tag.as_str()) {
            tags.push(tag.clone());
        }
    }
    tags
}

pub fn filter_posts(posts: &[Post], term: &str) -> Vec<Post> {
    posts
        .iter()
        .filter(|post| post.matches(term))
        .cloned()
        .collect()
}

/// One-based page slice. Pages past the end, page zero and a zero page size all yield an
/// empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let Some(start) = (page - 1).checked_mul(page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        len.div_ceil(page_size)
    }
}

/// Newest first, then the first `limit` entries.
pub fn latest(mut posts: Vec<Post>, limit: usize) -> Vec<Post> {
    posts.sort_by(|a, b| b.created.cmp(&a.created));
    posts.truncate(limit);
    posts
}
