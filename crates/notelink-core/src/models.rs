//! Domain models for notes and link metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;
use crate::urls::domain_of;

/// Kind of a note: free-form text or a saved link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    Note,
    Link,
}

/// Preview metadata for a link note.
///
/// A value is always fully populated: either a best-effort successful
/// result or the deliberate fallback produced when unfurling failed.
/// Fields are never left missing, so downstream renderers do not need to
/// distinguish "absent" from "empty".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMetadata {
    /// Remote page title, trimmed and capped at 200 characters.
    pub title: String,
    /// Remote page description, trimmed and capped at 300 characters.
    pub description: String,
    /// Preview image URL, or empty when the page offers none.
    pub image: String,
    /// Publisher name, falling back to the link's domain.
    pub site_name: String,
}

impl LinkMetadata {
    /// Build a metadata record from raw upstream fields.
    ///
    /// Title and description are trimmed of surrounding whitespace first,
    /// then hard-truncated to their maximum lengths.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        site_name: impl Into<String>,
    ) -> Self {
        Self {
            title: clip(&title.into(), defaults::TITLE_MAX_LEN),
            description: clip(&description.into(), defaults::DESCRIPTION_MAX_LEN),
            image: image.into(),
            site_name: site_name.into(),
        }
    }

    /// The degraded-but-valid record produced when unfurling fails.
    ///
    /// Derived only from the URL's domain; caching it means a failing URL
    /// is never retried.
    pub fn fallback(url: &str) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image: String::new(),
            site_name: domain_of(url),
        }
    }

    /// Whether this is a fallback record (no remote content arrived).
    pub fn is_fallback(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.image.is_empty()
    }
}

/// Trim, then truncate to at most `max` characters.
fn clip(s: &str, max: usize) -> String {
    let trimmed = s.trim();
    if trimmed.chars().count() <= max {
        trimmed.to_string()
    } else {
        trimmed.chars().take(max).collect()
    }
}

/// A note as seen by the metadata pipeline.
///
/// Notes are owned by the surrounding application; the pipeline only reads
/// them through [`crate::NoteStore`] and hands updated copies back via
/// `persist_note`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub title: String,
    /// The URL when `note_type` is [`NoteType::Link`].
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LinkMetadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a link note for `url` with an optional explicit title.
    pub fn link(url: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            note_type: NoteType::Link,
            title: title.into(),
            content: url.into(),
            metadata: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a plain text note.
    pub fn text(content: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            note_type: NoteType::Note,
            title: title.into(),
            content: content.into(),
            metadata: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this note participates in link unfurling.
    pub fn is_link(&self) -> bool {
        self.note_type == NoteType::Link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_new_trims_then_truncates() {
        let title = format!("  {}  ", "a".repeat(250));
        let description = format!("\n{}\t", "b".repeat(400));
        let meta = LinkMetadata::new(title, description, "", "example.com");
        assert_eq!(meta.title.len(), defaults::TITLE_MAX_LEN);
        assert_eq!(meta.description.len(), defaults::DESCRIPTION_MAX_LEN);
        assert!(meta.title.chars().all(|c| c == 'a'));
    }

    #[test]
    fn metadata_new_keeps_short_fields_untouched() {
        let meta = LinkMetadata::new("Example Page", "An example.", "", "Example");
        assert_eq!(meta.title, "Example Page");
        assert_eq!(meta.description, "An example.");
        assert_eq!(meta.site_name, "Example");
    }

    #[test]
    fn fallback_uses_domain_and_is_detectable() {
        let meta = LinkMetadata::fallback("https://www.example.com/page");
        assert_eq!(meta.site_name, "example.com");
        assert!(meta.title.is_empty());
        assert!(meta.is_fallback());
    }

    #[test]
    fn clip_respects_char_boundaries() {
        let s = "ééééé";
        assert_eq!(clip(s, 3), "ééé");
    }
}
