//! Microlink-style unfurl client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use notelink_core::{domain_of, Error, LinkMetadata, Result};

use crate::config::UnfurlConfig;

/// Backend that turns a URL into preview metadata.
///
/// Implementations never raise: failures of any kind come back as
/// [`LinkMetadata::fallback`] so callers have nothing to handle.
#[async_trait]
pub trait Unfurler: Send + Sync {
    async fn fetch(&self, url: &str) -> LinkMetadata;
}

/// Unfurl response wire shape: `{ data: { ... } }`.
#[derive(Debug, Deserialize)]
struct UnfurlResponse {
    data: UnfurlData,
}

#[derive(Debug, Default, Deserialize)]
struct UnfurlData {
    title: Option<String>,
    description: Option<String>,
    image: Option<MediaRef>,
    logo: Option<MediaRef>,
    publisher: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaRef {
    url: Option<String>,
}

/// Production [`Unfurler`] backed by a microlink-style HTTP API.
pub struct MicrolinkUnfurler {
    client: Client,
    config: UnfurlConfig,
}

impl MicrolinkUnfurler {
    /// Create a client with the given configuration.
    pub fn new(config: UnfurlConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(UnfurlConfig::from_env())
    }

    /// Fallible fetch path; the public contract wraps this.
    async fn try_fetch(&self, url: &str) -> Result<LinkMetadata> {
        let response = self
            .client
            .get(self.config.endpoint.as_str())
            .query(&[
                ("url", url),
                ("audio", "false"),
                ("video", "false"),
                ("iframe", "false"),
            ])
            .send()
            .await
            .map_err(|e| Error::Request(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::Request(format!(
                "Unfurl API returned {}",
                status
            )));
        }

        let body: UnfurlResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse response: {}", e)))?;

        Ok(metadata_from_payload(url, body.data))
    }
}

#[async_trait]
impl Unfurler for MicrolinkUnfurler {
    async fn fetch(&self, url: &str) -> LinkMetadata {
        let start = Instant::now();
        match self.try_fetch(url).await {
            Ok(meta) => {
                debug!(
                    component = "unfurl",
                    url,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Unfurled URL"
                );
                meta
            }
            Err(e) => {
                warn!(
                    component = "unfurl",
                    url,
                    error = %e,
                    "Unfurl failed, recording fallback metadata"
                );
                LinkMetadata::fallback(url)
            }
        }
    }
}

/// Map the upstream payload into our metadata shape.
///
/// `image` prefers the primary image, then the logo, then empty.
/// `site_name` prefers the publisher, then the URL's domain.
fn metadata_from_payload(url: &str, data: UnfurlData) -> LinkMetadata {
    let image = data
        .image
        .and_then(|m| m.url)
        .or_else(|| data.logo.and_then(|m| m.url))
        .unwrap_or_default();

    let site_name = match data.publisher {
        Some(p) if !p.is_empty() => p,
        _ => domain_of(url),
    };

    LinkMetadata::new(
        data.title.unwrap_or_default(),
        data.description.unwrap_or_default(),
        image,
        site_name,
    )
}
