//! Knobs for a sync run.

use chrono::Duration;

use crate::task::DedupStrategy;
use crate::window::DEFAULT_LOOKAHEAD_HOURS;

pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const DEFAULT_MARKER_TAG: &str = "twgcals";

#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub lookahead: Duration,
    /// Cap on events fetched per calendar.
    pub max_results: u32,
    /// Tag added to every created task.
    pub marker_tag: String,
    pub dedup: DedupStrategy,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            lookahead: Duration::hours(DEFAULT_LOOKAHEAD_HOURS),
            max_results: DEFAULT_MAX_RESULTS,
            marker_tag: DEFAULT_MARKER_TAG.to_string(),
            dedup: DedupStrategy::default(),
        }
    }
}
