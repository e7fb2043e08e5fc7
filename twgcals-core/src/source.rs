//! Where calendars and events come from.

use crate::calendar::Calendar;
use crate::error::SyncResult;
use crate::event::Event;
use crate::window::LookaheadWindow;

/// A remote calendar service.
#[allow(async_fn_in_trait)]
pub trait CalendarSource {
    /// All calendars visible to the authenticated account.
    async fn list_calendars(&self) -> SyncResult<Vec<Calendar>>;

    /// Events of `calendar` starting inside `window`, ordered by start time,
    /// with recurring events expanded into single instances and deleted
    /// events left out. At most `max_results` are returned.
    async fn list_events(
        &self,
        calendar: &Calendar,
        window: &LookaheadWindow,
        max_results: u32,
    ) -> SyncResult<Vec<Event>>;
}
