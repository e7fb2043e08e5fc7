//! A `TaskStore` wrapper that answers lookups but never writes.
//!
//! Skipped inserts are counted by later lookups, so a dry run reports the
//! same tasks a real run would create.

use std::cell::RefCell;

use tracing::info;
use twgcals_core::{NewTask, SyncResult, TaskFilter, TaskStore};

pub struct DryRun<S> {
    inner: S,
    skipped: RefCell<Vec<NewTask>>,
}

impl<S> DryRun<S> {
    pub fn new(inner: S) -> Self {
        DryRun {
            inner,
            skipped: RefCell::new(Vec::new()),
        }
    }

    /// Tasks that would have been created.
    pub fn skipped(&self) -> Vec<NewTask> {
        self.skipped.borrow().clone()
    }
}

impl<S: TaskStore> TaskStore for DryRun<S> {
    async fn count_matching(&self, filter: &TaskFilter) -> SyncResult<usize> {
        let existing = self.inner.count_matching(filter).await?;
        let pending = self
            .skipped
            .borrow()
            .iter()
            .filter(|task| filter.matches(task))
            .count();
        Ok(existing + pending)
    }

    async fn insert(&self, task: &NewTask) -> SyncResult<()> {
        info!(project = %task.project, summary = %task.description, "dry run, not adding task");
        self.skipped.borrow_mut().push(task.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;
    use twgcals_core::{EventTime, MatchKey, Project};

    #[derive(Default)]
    struct CountingStore {
        counts: Cell<usize>,
        inserts: Cell<usize>,
    }

    impl TaskStore for CountingStore {
        async fn count_matching(&self, _filter: &TaskFilter) -> SyncResult<usize> {
            self.counts.set(self.counts.get() + 1);
            Ok(0)
        }

        async fn insert(&self, _task: &NewTask) -> SyncResult<()> {
            self.inserts.set(self.inserts.get() + 1);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dry_run_forwards_counts_and_swallows_inserts() {
        let store = DryRun::new(CountingStore::default());
        let project = Project::new("work");
        let filter = TaskFilter {
            project: project.clone(),
            key: MatchKey::EventId("e1".to_string()),
        };
        let task = NewTask {
            project,
            description: "Standup".to_string(),
            due: EventTime::DateTime(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()),
            until: EventTime::DateTime(Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()),
            tags: vec!["work".to_string(), "twgcals".to_string()],
            event_id: "e1".to_string(),
        };

        assert_eq!(store.count_matching(&filter).await.unwrap(), 0);
        store.insert(&task).await.unwrap();

        assert_eq!(store.inner.counts.get(), 1);
        assert_eq!(store.inner.inserts.get(), 0);
        assert_eq!(store.skipped(), vec![task]);
    }

    #[tokio::test]
    async fn test_skipped_inserts_are_counted() {
        let store = DryRun::new(CountingStore::default());
        let project = Project::new("home");
        let task = NewTask {
            project: project.clone(),
            description: "Dentist".to_string(),
            due: EventTime::DateTime(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()),
            until: EventTime::DateTime(Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap()),
            tags: vec!["home".to_string(), "twgcals".to_string()],
            event_id: "e1".to_string(),
        };
        let same_summary = TaskFilter {
            project: project.clone(),
            key: MatchKey::Description("Dentist".to_string()),
        };
        let other_project = TaskFilter {
            project: Project::new("work"),
            key: MatchKey::Description("Dentist".to_string()),
        };

        assert_eq!(store.count_matching(&same_summary).await.unwrap(), 0);
        store.insert(&task).await.unwrap();

        assert_eq!(store.count_matching(&same_summary).await.unwrap(), 1);
        assert_eq!(store.count_matching(&other_project).await.unwrap(), 0);
        assert_eq!(store.inner.inserts.get(), 0);
    }
}
