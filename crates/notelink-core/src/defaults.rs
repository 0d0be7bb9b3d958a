//! Centralized defaults for the notelink pipeline.
//!
//! Every tunable the pipeline reads lives here, next to the environment
//! variable that overrides it. Keep the table in sync with README
//! configuration docs.
//!
//! | Constant | Env override | Default |
//! |----------|--------------|---------|
//! | `UNFURL_ENDPOINT` | `NOTELINK_UNFURL_ENDPOINT` | `https://api.microlink.io/` |
//! | `UNFURL_TIMEOUT_SECS` | `NOTELINK_UNFURL_TIMEOUT_SECS` | `30` |
//! | `FETCH_DELAY_MS` | `NOTELINK_FETCH_DELAY_MS` | `1000` |

/// Default endpoint of the unfurling API.
pub const UNFURL_ENDPOINT: &str = "https://api.microlink.io/";

/// Per-request timeout for unfurl calls (seconds).
pub const UNFURL_TIMEOUT_SECS: u64 = 30;

/// Fixed delay between consecutive unfurl requests (milliseconds).
///
/// Throttles outbound calls to the third-party service while the queue
/// drains; the drain loop sleeps this long between items.
pub const FETCH_DELAY_MS: u64 = 1000;

/// Maximum stored title length (characters).
pub const TITLE_MAX_LEN: usize = 200;

/// Maximum stored description length (characters).
pub const DESCRIPTION_MAX_LEN: usize = 300;

/// Maximum display title length, ellipsis included.
pub const SHORT_TITLE_MAX_LEN: usize = 50;

/// Maximum display description length before an ellipsis is appended.
pub const SHORT_DESCRIPTION_MAX_LEN: usize = 100;

/// Env var overriding [`UNFURL_ENDPOINT`].
pub const ENV_UNFURL_ENDPOINT: &str = "NOTELINK_UNFURL_ENDPOINT";

/// Env var overriding [`UNFURL_TIMEOUT_SECS`].
pub const ENV_UNFURL_TIMEOUT_SECS: &str = "NOTELINK_UNFURL_TIMEOUT_SECS";

/// Env var overriding [`FETCH_DELAY_MS`].
pub const ENV_FETCH_DELAY_MS: &str = "NOTELINK_FETCH_DELAY_MS";
