//! Collaborator trait the surrounding application implements.
//!
//! The pipeline does not own note storage or rendering. It looks notes up,
//! hands updated copies back for persistence, and pings the UI hook; the
//! host decides what those mean (localStorage, SQLite, a DOM re-render).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Note;
use crate::Result;

/// Access to notes owned by the host application.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Look up a note by id. `None` when the note no longer exists,
    /// in which case the pipeline silently skips the apply step.
    async fn find_note(&self, id: Uuid) -> Option<Note>;

    /// Persist an updated note. Errors are logged by the pipeline and
    /// never surfaced further; the cache entry stands regardless.
    async fn persist_note(&self, note: &Note) -> Result<()>;

    /// UI refresh hook, invoked after metadata was applied to a note.
    /// Hosts typically re-render just that note's element.
    fn on_metadata_applied(&self, note: &Note);
}

/// In-memory [`NoteStore`] for tests and embedded use.
///
/// Tracks how often the persistence and refresh hooks fire so tests can
/// assert exact call counts.
#[derive(Default)]
pub struct MemoryNoteStore {
    notes: Mutex<HashMap<Uuid, Note>>,
    persist_calls: AtomicUsize,
    applied_calls: AtomicUsize,
}

impl MemoryNoteStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert or replace a note.
    pub fn insert(&self, note: Note) {
        self.notes.lock().unwrap().insert(note.id, note);
    }

    /// Remove a note, returning it if present.
    pub fn remove(&self, id: Uuid) -> Option<Note> {
        self.notes.lock().unwrap().remove(&id)
    }

    /// Snapshot of a note by id.
    pub fn get(&self, id: Uuid) -> Option<Note> {
        self.notes.lock().unwrap().get(&id).cloned()
    }

    /// Number of times `persist_note` has been called.
    pub fn persist_count(&self) -> usize {
        self.persist_calls.load(Ordering::SeqCst)
    }

    /// Number of times `on_metadata_applied` has been called.
    pub fn applied_count(&self) -> usize {
        self.applied_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn find_note(&self, id: Uuid) -> Option<Note> {
        self.notes.lock().unwrap().get(&id).cloned()
    }

    async fn persist_note(&self, note: &Note) -> Result<()> {
        self.persist_calls.fetch_add(1, Ordering::SeqCst);
        self.notes.lock().unwrap().insert(note.id, note.clone());
        Ok(())
    }

    fn on_metadata_applied(&self, _note: &Note) {
        self.applied_calls.fetch_add(1, Ordering::SeqCst);
    }
}
