//! # notelink-queue
//!
//! The link-metadata fetch pipeline: a single-flight, serialized, cached
//! task queue that enriches link notes with preview metadata while the
//! rest of the application stays responsive.
//!
//! This crate provides:
//! - [`MetadataCache`]: process-lifetime URL → metadata cache
//! - [`FetchQueue`]: FIFO work items deduplicated by URL
//! - [`QueueProcessor`]: the drain loop with at most one fetch in flight
//! - [`MetadataService`]: the facade the host application talks to
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use notelink_core::MemoryNoteStore;
//! use notelink_queue::MetadataService;
//! use notelink_unfurl::MicrolinkUnfurler;
//!
//! let store = MemoryNoteStore::new();
//! let unfurler = Arc::new(MicrolinkUnfurler::from_env()?);
//! let service = MetadataService::new(unfurler, store.clone());
//!
//! // When a link note is created:
//! service.request_metadata(note_id, "https://example.com").await;
//! ```

pub mod cache;
pub mod processor;
pub mod queue;
pub mod service;

pub use cache::MetadataCache;
pub use processor::{ProcessorConfig, ProcessorEvent, QueueProcessor};
pub use queue::{Enqueue, FetchQueue};
pub use service::MetadataService;
