//! Integration tests for the metadata pipeline.
//!
//! This test suite validates:
//! - Pipeline-001: cache idempotence (one fetch per URL, ever)
//! - Pipeline-002: single-flight (at most one fetch outstanding)
//! - Pipeline-003: FIFO ordering across distinct URLs
//! - Pipeline-004: failures degrade into cached fallback metadata
//! - Pipeline-005: end-to-end note enrichment (title backfill, persistence)
//! - Pipeline-006: last requester wins when two notes share a queued URL
//! - Pipeline-007: deleted notes make the apply step a silent no-op

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use uuid::Uuid;

use notelink_core::{LinkMetadata, MemoryNoteStore, Note};
use notelink_queue::{MetadataService, ProcessorConfig};
use notelink_unfurl::MockUnfurler;

/// Short inter-request delay so drains finish quickly in tests.
fn test_config() -> ProcessorConfig {
    init_tracing();
    ProcessorConfig::default().with_delay_ms(5)
}

/// Honor RUST_LOG when debugging a test run.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn service_with(
    mock: &MockUnfurler,
    store: &Arc<MemoryNoteStore>,
) -> MetadataService {
    MetadataService::with_config(Arc::new(mock.clone()), store.clone(), test_config())
}

/// Poll until the queue has drained and the processor is idle.
async fn wait_until_idle(service: &MetadataService) {
    let start = std::time::Instant::now();
    while start.elapsed() < Duration::from_secs(5) {
        if service.queue_depth().await == 0 && !service.is_draining().await {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("pipeline did not go idle within 5s");
}

#[tokio::test]
async fn cache_idempotence_fetches_each_url_once() {
    let url = "https://example.com/a";
    let mock = MockUnfurler::new()
        .with_response(url, LinkMetadata::new("Example", "", "", "example.com"));
    let store = MemoryNoteStore::new();
    let service = service_with(&mock, &store);

    let first = Note::link(url, "");
    let second = Note::link(url, "");
    store.insert(first.clone());
    store.insert(second.clone());

    service.request_metadata(first.id, url).await;
    wait_until_idle(&service).await;

    // Second request is served from cache, synchronously applied.
    service.request_metadata(second.id, url).await;
    wait_until_idle(&service).await;

    assert_eq!(mock.call_count(), 1);
    let enriched = store.get(second.id).unwrap();
    assert_eq!(enriched.metadata.unwrap().title, "Example");
    assert_eq!(store.persist_count(), 2);
}

#[tokio::test]
async fn single_flight_never_overlaps_fetches() {
    let mock = MockUnfurler::new().with_latency(Duration::from_millis(30));
    let store = MemoryNoteStore::new();
    let service = service_with(&mock, &store);

    for url in ["https://a.com", "https://b.com", "https://c.com"] {
        let note = Note::link(url, "");
        store.insert(note.clone());
        service.request_metadata(note.id, url).await;
    }
    wait_until_idle(&service).await;

    assert_eq!(mock.call_count(), 3);
    assert_eq!(mock.max_in_flight(), 1);
}

#[tokio::test]
async fn urls_are_fetched_in_first_seen_order() {
    let mock = MockUnfurler::new();
    let store = MemoryNoteStore::new();
    let service = service_with(&mock, &store);

    for url in ["https://a.com", "https://b.com", "https://c.com"] {
        let note = Note::link(url, "");
        store.insert(note.clone());
        service.request_metadata(note.id, url).await;
    }
    wait_until_idle(&service).await;

    assert_eq!(
        mock.calls(),
        vec!["https://a.com", "https://b.com", "https://c.com"]
    );
}

#[tokio::test]
async fn failed_fetch_caches_fallback_and_never_retries() {
    let url = "https://www.broken.example.com/x";
    let mock = MockUnfurler::new().with_failure(url);
    let store = MemoryNoteStore::new();
    let service = service_with(&mock, &store);

    let note = Note::link(url, "");
    store.insert(note.clone());
    service.request_metadata(note.id, url).await;
    wait_until_idle(&service).await;

    let cached = service.cached(url).await.expect("failure must be cached");
    assert_eq!(cached, LinkMetadata::fallback(url));
    assert_eq!(cached.site_name, "broken.example.com");

    // A later request converges on the cached fallback without fetching.
    service.request_metadata(note.id, url).await;
    wait_until_idle(&service).await;
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn end_to_end_enriches_note_and_notifies_once() {
    let url = "https://example.com/a";
    let mock = MockUnfurler::new().with_response(
        url,
        LinkMetadata::new("Example Page", "An example.", "", ""),
    );
    let store = MemoryNoteStore::new();
    let service = service_with(&mock, &store);

    let note = Note::link(url, "");
    let id = note.id;
    store.insert(note);

    service.request_metadata(id, url).await;
    wait_until_idle(&service).await;

    let expected = LinkMetadata::new("Example Page", "An example.", "", "");
    assert_eq!(service.cached(url).await, Some(expected.clone()));

    let enriched = store.get(id).unwrap();
    assert_eq!(enriched.title, "Example Page");
    assert_eq!(enriched.metadata, Some(expected));
    assert_eq!(store.persist_count(), 1);
    assert_eq!(store.applied_count(), 1);
}

#[tokio::test]
async fn long_remote_title_is_truncated_and_shortened_for_display() {
    let url = "https://example.com/long";
    let long_title = "t".repeat(250);
    let mock = MockUnfurler::new().with_response(
        url,
        LinkMetadata::new(long_title, "d".repeat(400), "", "example.com"),
    );
    let store = MemoryNoteStore::new();
    let service = service_with(&mock, &store);

    let note = Note::link(url, "");
    let id = note.id;
    store.insert(note);

    service.request_metadata(id, url).await;
    wait_until_idle(&service).await;

    let enriched = store.get(id).unwrap();
    let metadata = enriched.metadata.unwrap();
    assert_eq!(metadata.title.len(), 200);
    assert_eq!(metadata.description.len(), 300);
    // Display title: 47 chars plus ellipsis.
    assert_eq!(enriched.title.len(), 50);
    assert!(enriched.title.ends_with("..."));
}

#[tokio::test]
async fn last_requester_wins_for_a_shared_queued_url() {
    let first_url = "https://slow.example.com";
    let shared_url = "https://shared.example.com";
    let mock = MockUnfurler::new()
        .with_latency(Duration::from_millis(40))
        .with_response(shared_url, LinkMetadata::new("Shared", "", "", ""));
    let store = MemoryNoteStore::new();
    let service = service_with(&mock, &store);

    let blocker = Note::link(first_url, "");
    let loser = Note::link(shared_url, "");
    let winner = Note::link(shared_url, "");
    store.insert(blocker.clone());
    store.insert(loser.clone());
    store.insert(winner.clone());

    // The first URL holds the processor busy while the shared URL is
    // requested twice; the queue records only the most recent note id.
    service.request_metadata(blocker.id, first_url).await;
    service.request_metadata(loser.id, shared_url).await;
    service.request_metadata(winner.id, shared_url).await;
    wait_until_idle(&service).await;

    assert_eq!(mock.call_count_for(shared_url), 1);
    assert!(store.get(winner.id).unwrap().metadata.is_some());
    assert!(store.get(loser.id).unwrap().metadata.is_none());
}

#[tokio::test]
async fn deleted_note_is_a_silent_no_op() {
    let url = "https://example.com/gone";
    let mock = MockUnfurler::new()
        .with_latency(Duration::from_millis(30))
        .with_response(url, LinkMetadata::new("Gone", "", "", ""));
    let store = MemoryNoteStore::new();
    let service = service_with(&mock, &store);

    let note = Note::link(url, "");
    let id = note.id;
    store.insert(note);

    service.request_metadata(id, url).await;
    store.remove(id);
    wait_until_idle(&service).await;

    // Fetch completed and was cached, but nothing was applied.
    assert!(service.cached(url).await.is_some());
    assert_eq!(store.persist_count(), 0);
    assert_eq!(store.applied_count(), 0);
}

#[tokio::test]
async fn request_for_unknown_note_still_populates_cache() {
    let url = "https://example.com/orphan";
    let mock = MockUnfurler::new();
    let store = MemoryNoteStore::new();
    let service = service_with(&mock, &store);

    service.request_metadata(Uuid::new_v4(), url).await;
    wait_until_idle(&service).await;

    assert!(service.cached(url).await.is_some());
    assert_eq!(store.applied_count(), 0);
}
