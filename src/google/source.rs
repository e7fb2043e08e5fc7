//! Google Calendar as a `CalendarSource`.

use google_calendar::types::{CalendarListEntry, EventDateTime, MinAccessRole, OrderBy};
use google_calendar::Client;
use tracing::debug;
use twgcals_core::{
    Calendar, CalendarSource, Event, EventTime, LookaheadWindow, SyncError, SyncResult,
};

pub struct GoogleCalendar {
    client: Client,
}

impl GoogleCalendar {
    pub fn new(client: Client) -> Self {
        GoogleCalendar { client }
    }
}

impl CalendarSource for GoogleCalendar {
    async fn list_calendars(&self) -> SyncResult<Vec<Calendar>> {
        let entries = self
            .client
            .calendar_list()
            .list_all(MinAccessRole::default(), false, false)
            .await
            .map_err(|e| SyncError::Calendar(format!("Failed to fetch calendars: {e}")))?
            .body;

        Ok(entries
            .into_iter()
            .filter(|c| !c.id.is_empty())
            .map(from_google_calendar)
            .collect())
    }

    async fn list_events(
        &self,
        calendar: &Calendar,
        window: &LookaheadWindow,
        max_results: u32,
    ) -> SyncResult<Vec<Event>> {
        let time_min = window.from_rfc3339();
        let time_max = window.to_rfc3339();

        let response = self
            .client
            .events()
            .list(
                &calendar.id,
                "",                      // i_cal_uid
                0,                       // max_attendees
                i64::from(max_results),  // max_results
                OrderBy::StartTime,      // order_by
                "",                      // page_token
                &[],                     // private_extended_property
                "",                      // q (search query)
                &[],                     // shared_extended_property
                false,                   // show_deleted
                false,                   // show_hidden_invitations
                true,                    // single_events: expand recurring events
                &time_max,               // time_max
                &time_min,               // time_min
                "",                      // time_zone
                "",                      // updated_min
            )
            .await
            .map_err(|e| {
                SyncError::Calendar(format!(
                    "Failed to fetch events for calendar {}: {e}",
                    calendar.id
                ))
            })?;

        debug!(calendar = %calendar.id, count = response.body.len(), "fetched events");

        let mut result = Vec::new();
        for event in response.body {
            // Skip cancelled events or events without an ID
            if event.status == "cancelled" || event.id.is_empty() {
                continue;
            }

            let summary = if event.summary.is_empty() {
                "(No title)".to_string()
            } else {
                event.summary
            };

            let start = event_time(event.start.as_ref(), &summary, "start")?;
            let end = event_time(event.end.as_ref(), &summary, "end")?;

            result.push(Event {
                id: event.id,
                summary,
                start,
                end,
            });
        }

        // The API honours max_results per page; keep the cap exact.
        result.truncate(max_results as usize);

        Ok(result)
    }
}

fn from_google_calendar(entry: CalendarListEntry) -> Calendar {
    Calendar {
        id: entry.id,
        summary: entry.summary,
        summary_override: if entry.summary_override.is_empty() {
            None
        } else {
            Some(entry.summary_override)
        },
    }
}

/// Timed events carry `dateTime`, all-day events only `date`.
fn event_time(time: Option<&EventDateTime>, summary: &str, which: &str) -> SyncResult<EventTime> {
    let time = time.ok_or_else(|| SyncError::Timestamp {
        summary: summary.to_string(),
        reason: format!("no {which} time"),
    })?;

    if let Some(dt) = time.date_time {
        Ok(EventTime::DateTime(dt))
    } else if let Some(date) = time.date {
        Ok(EventTime::Date(date))
    } else {
        Err(SyncError::Timestamp {
            summary: summary.to_string(),
            reason: format!("{which} has neither dateTime nor date"),
        })
    }
}
