//! Task-side types: what we look up and what we create.

use serde::{Deserialize, Serialize};

use crate::calendar::Project;
use crate::event::{Event, EventTime};

/// How an event is recognised as already synced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupStrategy {
    /// Match on the event id stored on the task. Exact.
    #[default]
    EventId,
    /// Match on project and description. Two events with the same summary
    /// in one project look identical.
    Description,
}

/// What identifies the event within the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKey {
    EventId(String),
    Description(String),
}

/// Filter for the dedup check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub project: Project,
    pub key: MatchKey,
}

impl TaskFilter {
    pub fn for_event(project: &Project, event: &Event, strategy: DedupStrategy) -> Self {
        let key = match strategy {
            DedupStrategy::EventId => MatchKey::EventId(event.id.clone()),
            DedupStrategy::Description => MatchKey::Description(event.summary.clone()),
        };

        TaskFilter {
            project: project.clone(),
            key,
        }
    }

    /// Whether `task` would be counted by this filter. Projects match exactly.
    pub fn matches(&self, task: &NewTask) -> bool {
        self.project == task.project
            && match &self.key {
                MatchKey::EventId(id) => *id == task.event_id,
                MatchKey::Description(desc) => *desc == task.description,
            }
    }
}

/// A task to create for an event.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub project: Project,
    pub description: String,
    pub due: EventTime,
    pub until: EventTime,
    /// Project segments first, marker tag last.
    pub tags: Vec<String>,
    pub event_id: String,
}

impl NewTask {
    pub fn from_event(project: &Project, event: &Event, marker_tag: &str) -> Self {
        let mut tags = project.tags();
        if !tags.iter().any(|t| t == marker_tag) {
            tags.push(marker_tag.to_string());
        }

        NewTask {
            project: project.clone(),
            description: event.summary.clone(),
            due: event.start,
            until: event.end,
            tags,
            event_id: event.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn standup() -> Event {
        Event {
            id: "evt123".to_string(),
            summary: "Standup".to_string(),
            start: EventTime::DateTime(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()),
            end: EventTime::DateTime(Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()),
        }
    }

    #[test]
    fn test_new_task_tags_end_with_marker() {
        let task = NewTask::from_event(&Project::new("work.clientA"), &standup(), "twgcals");

        assert_eq!(task.tags, vec!["work", "clientA", "twgcals"]);
        assert_eq!(task.description, "Standup");
        assert_eq!(task.due, standup().start);
        assert_eq!(task.until, standup().end);
        assert_eq!(task.event_id, "evt123");
    }

    #[test]
    fn test_marker_not_duplicated_when_project_contains_it() {
        let task = NewTask::from_event(&Project::new("twgcals.misc"), &standup(), "twgcals");
        assert_eq!(task.tags, vec!["twgcals", "misc"]);
    }

    #[test]
    fn test_filter_follows_strategy() {
        let project = Project::new("work");

        let by_id = TaskFilter::for_event(&project, &standup(), DedupStrategy::EventId);
        assert_eq!(by_id.key, MatchKey::EventId("evt123".to_string()));

        let by_desc = TaskFilter::for_event(&project, &standup(), DedupStrategy::Description);
        assert_eq!(by_desc.key, MatchKey::Description("Standup".to_string()));
    }

    #[test]
    fn test_filter_matches_only_its_own_project() {
        let client = Project::new("work.clientA");
        let task = NewTask::from_event(&client, &standup(), "twgcals");

        let same = TaskFilter::for_event(&client, &standup(), DedupStrategy::Description);
        assert!(same.matches(&task));

        let parent =
            TaskFilter::for_event(&Project::new("work"), &standup(), DedupStrategy::Description);
        assert!(!parent.matches(&task));

        let mut other = standup();
        other.id = "evt456".to_string();
        let by_id = TaskFilter::for_event(&client, &other, DedupStrategy::EventId);
        assert!(!by_id.matches(&task));
    }
}
