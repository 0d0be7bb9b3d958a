//! Configuration for the unfurl client.

use notelink_core::defaults;

/// Configuration for [`crate::MicrolinkUnfurler`].
#[derive(Debug, Clone)]
pub struct UnfurlConfig {
    /// Base URL of the unfurling API.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for UnfurlConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::UNFURL_ENDPOINT.to_string(),
            timeout_secs: defaults::UNFURL_TIMEOUT_SECS,
        }
    }
}

impl UnfurlConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `NOTELINK_UNFURL_ENDPOINT` | `https://api.microlink.io/` | API base URL |
    /// | `NOTELINK_UNFURL_TIMEOUT_SECS` | `30` | Per-request timeout |
    pub fn from_env() -> Self {
        let endpoint = std::env::var(defaults::ENV_UNFURL_ENDPOINT)
            .unwrap_or_else(|_| defaults::UNFURL_ENDPOINT.to_string());

        let timeout_secs = std::env::var(defaults::ENV_UNFURL_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::UNFURL_TIMEOUT_SECS)
            .max(1);

        Self {
            endpoint,
            timeout_secs,
        }
    }

    /// Set the API endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
