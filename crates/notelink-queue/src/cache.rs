//! Process-lifetime cache of fetched link metadata.

use std::collections::HashMap;

use notelink_core::LinkMetadata;

/// Mapping from exact URL string to fetched metadata.
///
/// Keys are the URL as requested; no normalization of trailing slashes or
/// query order is performed, matching the fetch key used everywhere else.
/// Entries are never evicted: a URL is fetched at most once per process,
/// and failed fetches are cached as fallback records so they are never
/// retried either.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: HashMap<String, LinkMetadata>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&LinkMetadata> {
        self.entries.get(url)
    }

    pub fn get_cloned(&self, url: &str) -> Option<LinkMetadata> {
        self.entries.get(url).cloned()
    }

    /// Unconditional overwrite.
    pub fn set(&mut self, url: impl Into<String>, metadata: LinkMetadata) {
        self.entries.insert(url.into(), metadata);
    }

    pub fn has(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
