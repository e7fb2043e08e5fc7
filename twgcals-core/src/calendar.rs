//! Calendars and the projects derived from their names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A calendar visible to the authenticated account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub summary: String,
    /// Name the user gave the calendar in their own list, if any.
    pub summary_override: Option<String>,
}

impl Calendar {
    /// The name shown to the user: the override when set, otherwise the summary.
    pub fn display_name(&self) -> Option<&str> {
        self.summary_override
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| Some(self.summary.trim()).filter(|s| !s.is_empty()))
    }

    /// Project label for tasks created from this calendar.
    ///
    /// None when the calendar has no human-readable name.
    pub fn project(&self) -> Option<Project> {
        self.display_name().map(Project::new)
    }
}

/// Taskwarrior project label, e.g. `work.clientA`.
///
/// Name calendars `project.subproject` to get hierarchical projects and tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project(String);

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Project(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// One tag per dot-separated segment.
    ///
    /// Empty segments are dropped and whitespace becomes `_`, since tags
    /// cannot contain spaces.
    pub fn tags(&self) -> Vec<String> {
        self.0
            .split('.')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                segment
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join("_")
            })
            .collect()
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar(summary: &str, summary_override: Option<&str>) -> Calendar {
        Calendar {
            id: "cal@example.com".to_string(),
            summary: summary.to_string(),
            summary_override: summary_override.map(str::to_string),
        }
    }

    #[test]
    fn test_override_wins_over_summary() {
        let cal = calendar("someone@example.com", Some("work.clientA"));
        assert_eq!(cal.display_name(), Some("work.clientA"));
    }

    #[test]
    fn test_empty_override_falls_back_to_summary() {
        let cal = calendar("home", Some("  "));
        assert_eq!(cal.project(), Some(Project::new("home")));
    }

    #[test]
    fn test_unnamed_calendar_has_no_project() {
        let cal = calendar("", None);
        assert_eq!(cal.project(), None);
    }

    #[test]
    fn test_tags_split_on_dots() {
        let project = Project::new("work.clientA");
        assert_eq!(project.tags(), vec!["work", "clientA"]);
    }

    #[test]
    fn test_tags_skip_empty_segments_and_replace_spaces() {
        let project = Project::new("Holidays in Sweden..public");
        assert_eq!(project.tags(), vec!["Holidays_in_Sweden", "public"]);
    }
}
