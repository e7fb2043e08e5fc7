//! Provider-neutral event types.
//!
//! The calendar source converts its API responses into these types and the
//! synchronizer works exclusively with them.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Format used for timed events handed to the task store.
pub const TASK_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format used for all-day events handed to the task store.
pub const TASK_DATE_FORMAT: &str = "%Y-%m-%d";

/// An upcoming calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Provider event id; unique per expanded instance of a recurring event.
    pub id: String,
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    /// All-day events carry only a date.
    Date(NaiveDate),
}

impl EventTime {
    /// Render for the task store.
    ///
    /// Timed events are converted to `tz` and printed without an offset;
    /// all-day events fall back to the bare date.
    pub fn render_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match self {
            EventTime::DateTime(dt) => dt
                .with_timezone(tz)
                .format(TASK_DATETIME_FORMAT)
                .to_string(),
            EventTime::Date(date) => date.format(TASK_DATE_FORMAT).to_string(),
        }
    }
}
