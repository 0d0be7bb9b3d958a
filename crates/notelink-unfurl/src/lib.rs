//! # notelink-unfurl
//!
//! Unfurling backend abstraction for notelink.
//!
//! This crate provides:
//! - The [`Unfurler`] trait the queue processor drives
//! - [`MicrolinkUnfurler`], a client for a microlink-style extraction API
//! - [`MockUnfurler`] for deterministic tests
//!
//! The contract is deliberately infallible: `fetch` never returns an
//! error. Any transport, status, or payload problem degrades into
//! [`LinkMetadata::fallback`], which downstream code caches like any other
//! result so failing URLs are never retried.
//!
//! [`LinkMetadata::fallback`]: notelink_core::LinkMetadata::fallback

pub mod config;
pub mod microlink;
pub mod mock;

pub use config::UnfurlConfig;
pub use microlink::{MicrolinkUnfurler, Unfurler};
pub use mock::MockUnfurler;
