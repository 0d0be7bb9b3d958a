//! Serialized drain loop for the fetch queue.
//!
//! The processor is a two-state machine: `Idle` or `Draining` with at most
//! one unfurl request in flight. All cache and queue mutations happen under
//! a single mutex; the mutex is released across the one suspension point
//! (the outbound fetch) and across the inter-request delay, so the rest of
//! the application never waits on the pipeline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, Mutex};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

use notelink_core::{defaults, short_title, LinkMetadata, NoteStore};
use notelink_unfurl::Unfurler;

use crate::cache::MetadataCache;
use crate::queue::FetchQueue;

/// Capacity of the event broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Configuration for the queue processor.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Fixed delay between consecutive unfurl requests (milliseconds).
    pub inter_request_delay_ms: u64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            inter_request_delay_ms: defaults::FETCH_DELAY_MS,
        }
    }
}

impl ProcessorConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `NOTELINK_FETCH_DELAY_MS` | `1000` | Delay between unfurl requests |
    pub fn from_env() -> Self {
        let inter_request_delay_ms = std::env::var(defaults::ENV_FETCH_DELAY_MS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::FETCH_DELAY_MS);

        Self {
            inter_request_delay_ms,
        }
    }

    /// Set the inter-request delay.
    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.inter_request_delay_ms = ms;
        self
    }
}

/// Event emitted by the queue processor.
#[derive(Debug, Clone)]
pub enum ProcessorEvent {
    /// A URL is about to be fetched (or resolved from cache).
    FetchStarted { url: String },
    /// A URL finished processing and its result was cached.
    FetchCompleted { url: String, fallback: bool },
    /// The queue emptied and the processor went idle.
    DrainFinished,
}

/// Shared pipeline state guarded by one mutex.
///
/// `draining` is the single-flight flag: exactly one drain task exists
/// while it is set, and that task is the only code that fetches.
#[derive(Default)]
pub(crate) struct PipelineState {
    pub(crate) cache: MetadataCache,
    pub(crate) queue: FetchQueue,
    pub(crate) draining: bool,
}

/// The serialized worker that drains the fetch queue.
pub struct QueueProcessor {
    unfurler: Arc<dyn Unfurler>,
    store: Arc<dyn NoteStore>,
    state: Arc<Mutex<PipelineState>>,
    config: ProcessorConfig,
    event_tx: broadcast::Sender<ProcessorEvent>,
}

impl QueueProcessor {
    pub(crate) fn new(
        unfurler: Arc<dyn Unfurler>,
        store: Arc<dyn NoteStore>,
        state: Arc<Mutex<PipelineState>>,
        config: ProcessorConfig,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            unfurler,
            store,
            state,
            config,
            event_tx,
        }
    }

    /// Subscribe to processor events.
    pub fn subscribe(&self) -> broadcast::Receiver<ProcessorEvent> {
        self.event_tx.subscribe()
    }

    /// Spawn the drain task. The caller must have set `draining` while
    /// holding the state lock; this keeps spawn decisions race-free.
    pub(crate) fn spawn_drain(self: &Arc<Self>) {
        let processor = Arc::clone(self);
        tokio::spawn(async move {
            processor.drain().await;
        });
    }

    /// Process queue items one at a time until the queue empties.
    async fn drain(self: Arc<Self>) {
        info!(component = "processor", "Drain started");
        loop {
            // Peek the front item. The entry stays queued during the fetch
            // so concurrent requests for the same URL see it as pending.
            let (url, note_id) = {
                let mut state = self.state.lock().await;
                match state.queue.front() {
                    Some((url, note_id)) => (url.to_string(), note_id),
                    None => {
                        state.draining = false;
                        break;
                    }
                }
            };

            self.emit(ProcessorEvent::FetchStarted { url: url.clone() });
            let start = Instant::now();

            // Defensive check: a concurrent request may have resolved this
            // URL already; skip the network call and just apply.
            let cached = { self.state.lock().await.cache.get_cloned(&url) };
            let metadata = match cached {
                Some(metadata) => {
                    debug!(component = "processor", url, "URL already cached, skipping fetch");
                    metadata
                }
                // The single suspension point: no lock held, nothing else
                // dequeues or fetches until this resolves.
                None => self.unfurler.fetch(&url).await,
            };

            {
                let mut state = self.state.lock().await;
                state.cache.set(url.clone(), metadata.clone());
            }

            self.apply_metadata(note_id, &metadata).await;

            let queue_depth = {
                let mut state = self.state.lock().await;
                state.queue.remove(&url);
                state.queue.len()
            };

            debug!(
                component = "processor",
                url,
                queue_depth,
                duration_ms = start.elapsed().as_millis() as u64,
                "Queue item processed"
            );
            self.emit(ProcessorEvent::FetchCompleted {
                url,
                fallback: metadata.is_fallback(),
            });

            // Going idle is decided under the lock so an enqueue arriving
            // now either sees draining=true or spawns the next drain itself.
            {
                let mut state = self.state.lock().await;
                if state.queue.is_empty() {
                    state.draining = false;
                    break;
                }
            }

            // Throttle the next outbound call to the third-party service.
            sleep(Duration::from_millis(self.config.inter_request_delay_ms)).await;
        }

        info!(component = "processor", "Drain finished");
        self.emit(ProcessorEvent::DrainFinished);
    }

    /// Apply fetched metadata to the note that requested it.
    ///
    /// A missing note (deleted while its fetch was pending) is a silent
    /// no-op: the result stays cached for future requesters.
    pub(crate) async fn apply_metadata(&self, note_id: Uuid, metadata: &LinkMetadata) {
        let Some(mut note) = self.store.find_note(note_id).await else {
            debug!(
                component = "processor",
                note_id = %note_id,
                "Note vanished before metadata could be applied"
            );
            return;
        };

        note.metadata = Some(metadata.clone());
        if note.is_link() && note.title.is_empty() && !metadata.title.is_empty() {
            note.title = short_title(&metadata.title);
        }
        note.updated_at = chrono::Utc::now();

        if let Err(e) = self.store.persist_note(&note).await {
            // The fetch itself succeeded; the cache entry stands.
            warn!(
                component = "processor",
                note_id = %note_id,
                error = %e,
                "Failed to persist note metadata"
            );
        }
        self.store.on_metadata_applied(&note);
    }

    fn emit(&self, event: ProcessorEvent) {
        // Nobody listening is fine.
        let _ = self.event_tx.send(event);
    }
}
