//! # notelink-core
//!
//! Core types, traits, and abstractions for the notelink metadata pipeline.
//!
//! This crate provides the domain model (notes and link metadata), the
//! `NoteStore` collaborator trait the surrounding application implements,
//! and the URL helpers shared by every other notelink crate.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod urls;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{LinkMetadata, Note, NoteType};
pub use store::{MemoryNoteStore, NoteStore};
pub use urls::{domain_of, favicon_url, is_valid_url, short_description, short_title};
