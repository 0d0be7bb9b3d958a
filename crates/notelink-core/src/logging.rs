//! Structured logging field name constants for notelink.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log queries work the same across the unfurl client, the queue
//! processor, and the service facade.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | WARN  | Unfurl failure converted to fallback, persistence failure |
//! | INFO  | Drain start/finish |
//! | DEBUG | Cache hits, queue transitions, skipped applies |

/// Component within the pipeline.
/// Values: "cache", "queue", "processor", "unfurl", "service"
pub const COMPONENT: &str = "component";

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// URL being unfurled or looked up.
pub const URL: &str = "url";

/// Number of items waiting in the fetch queue.
pub const QUEUE_DEPTH: &str = "queue_depth";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";
