use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One discovered anchor: its visible text and the raw `href` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkRecord {
    pub text: String,
    /// Attribute value exactly as found in markup; never resolved against the page URL.
    #[serde(rename = "url")]
    pub href: String,
}

impl LinkRecord {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// The record of one page capture.
///
/// Field names on the wire (`url`, `timestamp`, `links`) are shared by every
/// output format so a document reads the same regardless of encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureDocument {
    #[serde(rename = "url")]
    source_url: String,
    #[serde(rename = "timestamp")]
    captured_at: DateTime<Utc>,
    #[serde(default)]
    links: Vec<LinkRecord>,
}

impl CaptureDocument {
    /// Creates an empty document for a capture starting at `captured_at`.
    pub fn new(source_url: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        Self {
            source_url: source_url.into(),
            captured_at,
            links: Vec::new(),
        }
    }

    /// Rebuilds a document from already decoded parts.
    pub fn from_parts(
        source_url: impl Into<String>,
        captured_at: DateTime<Utc>,
        links: Vec<LinkRecord>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            captured_at,
            links,
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Appends a link in discovery order. Duplicates are kept.
    pub fn push(&mut self, link: LinkRecord) {
        self.links.push(link);
    }
}
