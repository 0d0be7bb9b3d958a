//! Public facade of the metadata pipeline.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::debug;
use uuid::Uuid;

use notelink_core::{LinkMetadata, NoteStore};
use notelink_unfurl::Unfurler;

use crate::processor::{PipelineState, ProcessorConfig, ProcessorEvent, QueueProcessor};
use crate::queue::Enqueue;

/// The only surface the rest of the application touches.
///
/// Construct one instance at application start and pass it by reference to
/// whatever layer creates or edits link notes. Cache and queue live inside
/// the instance; fresh instances give tests full isolation.
pub struct MetadataService {
    state: Arc<Mutex<PipelineState>>,
    processor: Arc<QueueProcessor>,
}

impl MetadataService {
    /// Create a service with the default processor configuration.
    pub fn new(unfurler: Arc<dyn Unfurler>, store: Arc<dyn NoteStore>) -> Self {
        Self::with_config(unfurler, store, ProcessorConfig::default())
    }

    /// Create a service with a custom processor configuration.
    pub fn with_config(
        unfurler: Arc<dyn Unfurler>,
        store: Arc<dyn NoteStore>,
        config: ProcessorConfig,
    ) -> Self {
        let state = Arc::new(Mutex::new(PipelineState::default()));
        let processor = Arc::new(QueueProcessor::new(
            unfurler,
            store,
            Arc::clone(&state),
            config,
        ));
        Self { state, processor }
    }

    /// Request metadata for a link note.
    ///
    /// Cache hit: the cached record is applied to the note immediately, no
    /// network call. Miss: the URL is queued (or its note id updated if
    /// already queued) and a drain is started if the processor was idle.
    /// Never fails; unfurl errors degrade into cached fallback metadata.
    pub async fn request_metadata(&self, note_id: Uuid, url: &str) {
        let cached = { self.state.lock().await.cache.get_cloned(url) };
        if let Some(metadata) = cached {
            debug!(component = "service", url, note_id = %note_id, "Cache hit");
            self.processor.apply_metadata(note_id, &metadata).await;
            return;
        }

        let start_drain = {
            let mut state = self.state.lock().await;
            match state.queue.enqueue(url, note_id) {
                // Already being handled; the recorded note id was updated.
                Enqueue::Updated => false,
                Enqueue::New => {
                    debug!(
                        component = "service",
                        url,
                        note_id = %note_id,
                        queue_depth = state.queue.len(),
                        "URL queued"
                    );
                    if state.draining {
                        false
                    } else {
                        state.draining = true;
                        true
                    }
                }
            }
        };

        if start_drain {
            self.processor.spawn_drain();
        }
    }

    /// Cached metadata for a URL, if any.
    pub async fn cached(&self, url: &str) -> Option<LinkMetadata> {
        self.state.lock().await.cache.get_cloned(url)
    }

    /// Number of URLs waiting in the fetch queue.
    pub async fn queue_depth(&self) -> usize {
        self.state.lock().await.queue.len()
    }

    /// Whether a drain task is currently running.
    pub async fn is_draining(&self) -> bool {
        self.state.lock().await.draining
    }

    /// Subscribe to processor events.
    pub fn subscribe(&self) -> broadcast::Receiver<ProcessorEvent> {
        self.processor.subscribe()
    }
}
