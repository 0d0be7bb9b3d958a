//! Mock unfurler for deterministic testing.
//!
//! Scripts responses per URL, records call order, and tracks how many
//! fetches were in flight at once so tests can assert the single-flight
//! guarantee.
//!
//! ## Usage
//!
//! ```rust
//! use notelink_unfurl::{MockUnfurler, Unfurler};
//! use notelink_core::LinkMetadata;
//!
//! #[tokio::test]
//! async fn test_with_mock_unfurler() {
//!     let mock = MockUnfurler::new()
//!         .with_response("https://a.com", LinkMetadata::new("A", "", "", "a.com"))
//!         .with_failure("https://b.com");
//!
//!     let meta = mock.fetch("https://a.com").await;
//!     assert_eq!(meta.title, "A");
//!     assert_eq!(mock.call_count(), 1);
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use notelink_core::LinkMetadata;

use crate::microlink::Unfurler;

#[derive(Default)]
struct CallState {
    calls: Vec<String>,
    in_flight: usize,
    max_in_flight: usize,
}

/// Mock [`Unfurler`] for testing.
#[derive(Clone, Default)]
pub struct MockUnfurler {
    responses: HashMap<String, LinkMetadata>,
    failures: HashSet<String>,
    latency: Option<Duration>,
    state: Arc<Mutex<CallState>>,
}

impl MockUnfurler {
    /// Create a mock that answers every URL with fallback metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response for `url`.
    pub fn with_response(mut self, url: impl Into<String>, metadata: LinkMetadata) -> Self {
        self.responses.insert(url.into(), metadata);
        self
    }

    /// Script a failed fetch for `url` (yields fallback metadata, like the
    /// real client does on any error).
    pub fn with_failure(mut self, url: impl Into<String>) -> Self {
        self.failures.insert(url.into());
        self
    }

    /// Add simulated latency to every fetch. Useful for widening the
    /// window in which a concurrency violation would be observable.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// URLs fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Total number of fetches.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Number of fetches of a specific URL.
    pub fn call_count_for(&self, url: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.as_str() == url)
            .count()
    }

    /// Highest number of concurrently outstanding fetches observed.
    pub fn max_in_flight(&self) -> usize {
        self.state.lock().unwrap().max_in_flight
    }
}

#[async_trait]
impl Unfurler for MockUnfurler {
    async fn fetch(&self, url: &str) -> LinkMetadata {
        {
            let mut state = self.state.lock().unwrap();
            state.calls.push(url.to_string());
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let result = if self.failures.contains(url) {
            LinkMetadata::fallback(url)
        } else {
            self.responses
                .get(url)
                .cloned()
                .unwrap_or_else(|| LinkMetadata::fallback(url))
        };

        self.state.lock().unwrap().in_flight -= 1;
        result
    }
}
