//! FIFO fetch queue deduplicated by URL.

use std::collections::{HashMap, VecDeque};

use uuid::Uuid;

/// Outcome of an enqueue attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueue {
    /// The URL was not queued before; a new item was inserted at the back.
    New,
    /// The URL was already queued; only its note id was overwritten and
    /// its position is unchanged. The caller must not start a second drain.
    Updated,
}

/// Ordered set of pending (url → requesting note id) work items.
///
/// Keyed by URL, not note id: one entry per URL regardless of how many
/// notes reference it. When a URL is requested again before processing,
/// the most recent note id wins — only that note receives the apply
/// callback once the fetch completes.
#[derive(Debug, Default)]
pub struct FetchQueue {
    order: VecDeque<String>,
    items: HashMap<String, Uuid>,
}

impl FetchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a work item, or update the note id of an existing one.
    pub fn enqueue(&mut self, url: impl Into<String>, note_id: Uuid) -> Enqueue {
        let url = url.into();
        if self.items.insert(url.clone(), note_id).is_some() {
            Enqueue::Updated
        } else {
            self.order.push_back(url);
            Enqueue::New
        }
    }

    /// The earliest-inserted item, without removing it.
    ///
    /// The processor peeks here before fetching and removes the item only
    /// after the fetch completes, so requests arriving mid-flight see the
    /// URL as still queued.
    pub fn front(&self) -> Option<(&str, Uuid)> {
        let url = self.order.front()?;
        let note_id = *self.items.get(url)?;
        Some((url.as_str(), note_id))
    }

    /// Remove and return the earliest-inserted item.
    pub fn dequeue_front(&mut self) -> Option<(String, Uuid)> {
        let url = self.order.pop_front()?;
        let note_id = self.items.remove(&url)?;
        Some((url, note_id))
    }

    /// Remove an item by URL, wherever it sits.
    pub fn remove(&mut self, url: &str) -> Option<Uuid> {
        let note_id = self.items.remove(url)?;
        self.order.retain(|u| u != url);
        Some(note_id)
    }

    pub fn has(&self, url: &str) -> bool {
        self.items.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
