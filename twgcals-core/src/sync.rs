//! The sync loop: list calendars, list upcoming events, check then insert.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::calendar::{Calendar, Project};
use crate::error::SyncResult;
use crate::event::Event;
use crate::settings::SyncSettings;
use crate::source::CalendarSource;
use crate::store::TaskStore;
use crate::task::{NewTask, TaskFilter};
use crate::window::LookaheadWindow;

/// Counters for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub calendars: usize,
    /// Calendars without a human-readable name.
    pub skipped_calendars: usize,
    pub events: usize,
    pub created: usize,
    pub already_synced: usize,
}

/// What happened to a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Created,
    AlreadySynced,
}

pub struct Synchronizer<C, S> {
    source: C,
    store: S,
    settings: SyncSettings,
}

impl<C: CalendarSource, S: TaskStore> Synchronizer<C, S> {
    pub fn new(source: C, store: S, settings: SyncSettings) -> Self {
        Synchronizer {
            source,
            store,
            settings,
        }
    }

    /// Sync every calendar. The first error aborts the run.
    pub async fn run(&self, now: DateTime<Utc>) -> SyncResult<SyncReport> {
        let window = LookaheadWindow::starting_at(now, self.settings.lookahead);
        let mut report = SyncReport::default();

        let calendars = self.source.list_calendars().await?;
        debug!(count = calendars.len(), "listed calendars");

        for calendar in &calendars {
            self.sync_calendar(calendar, &window, &mut report).await?;
        }

        info!(
            calendars = report.calendars,
            events = report.events,
            created = report.created,
            already_synced = report.already_synced,
            "sync finished"
        );

        Ok(report)
    }

    async fn sync_calendar(
        &self,
        calendar: &Calendar,
        window: &LookaheadWindow,
        report: &mut SyncReport,
    ) -> SyncResult<()> {
        let Some(project) = calendar.project() else {
            warn!(calendar = %calendar.id, "calendar has no name, skipping");
            report.skipped_calendars += 1;
            return Ok(());
        };

        report.calendars += 1;

        let events = self
            .source
            .list_events(calendar, window, self.settings.max_results)
            .await?;
        debug!(project = %project, count = events.len(), "listed upcoming events");

        for event in &events {
            report.events += 1;
            match self.sync_event(&project, event).await? {
                EventOutcome::Created => report.created += 1,
                EventOutcome::AlreadySynced => report.already_synced += 1,
            }
        }

        Ok(())
    }

    /// Dedup check followed by an insert when nothing matched.
    pub async fn sync_event(&self, project: &Project, event: &Event) -> SyncResult<EventOutcome> {
        let filter = TaskFilter::for_event(project, event, self.settings.dedup);

        if self.store.count_matching(&filter).await? > 0 {
            debug!(project = %project, summary = %event.summary, "already synced");
            return Ok(EventOutcome::AlreadySynced);
        }

        let task = NewTask::from_event(project, event, &self.settings.marker_tag);
        self.store.insert(&task).await?;
        info!(project = %project, summary = %event.summary, "created task");

        Ok(EventOutcome::Created)
    }
}
