//! Time window for upcoming events.

use chrono::{DateTime, Duration, Utc};

/// Default lookahead in hours.
pub const DEFAULT_LOOKAHEAD_HOURS: i64 = 25;

/// Events starting in `[from, to)` are considered upcoming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookaheadWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl LookaheadWindow {
    /// The end saturates at the latest representable instant.
    pub fn starting_at(now: DateTime<Utc>, lookahead: Duration) -> Self {
        LookaheadWindow {
            from: now,
            to: now
                .checked_add_signed(lookahead)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Get `from` as RFC3339 string.
    pub fn from_rfc3339(&self) -> String {
        self.from.to_rfc3339()
    }

    /// Get `to` as RFC3339 string.
    pub fn to_rfc3339(&self) -> String {
        self.to.to_rfc3339()
    }
}
