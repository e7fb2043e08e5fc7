//! Taskwarrior as a `TaskStore`.
//!
//! Talks to the `task` command-line tool: one `count` invocation per dedup
//! check, one `add` per created task.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use chrono::{Local, TimeZone};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;
use twgcals_core::{MatchKey, NewTask, SyncError, SyncResult, TaskFilter, TaskStore};

/// User-defined attribute holding the calendar event id.
pub const EVENT_ID_UDA: &str = "twgcalsid";

/// Matches `twgcals_core::event::TASK_DATETIME_FORMAT`.
const DATE_FORMAT_DIRECTIVE: &str = "rc.dateformat:Y-M-DTH:N:S";

pub struct TaskWarrior {
    binary: PathBuf,
    timeout: Duration,
}

impl TaskWarrior {
    /// Locate the task binary. `binary` may be a name in PATH or a path.
    pub fn new(binary: &str, timeout: Duration) -> SyncResult<Self> {
        let binary = which::which(binary).map_err(|_| {
            SyncError::Config(format!(
                "Taskwarrior executable '{binary}' not found. Install taskwarrior or set task_binary"
            ))
        })?;

        Ok(TaskWarrior { binary, timeout })
    }

    async fn run(&self, args: &[String]) -> SyncResult<String> {
        debug!(binary = %self.binary.display(), ?args, "running task");

        let child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = timeout(self.timeout, child)
            .await
            .map_err(|_| {
                SyncError::TaskStore(format!(
                    "task did not finish within {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| {
                SyncError::TaskStore(format!("Failed to spawn {}: {e}", self.binary.display()))
            })?;

        if !output.status.success() {
            return Err(SyncError::TaskStore(format!(
                "task exited with status {}: {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TaskStore for TaskWarrior {
    async fn count_matching(&self, filter: &TaskFilter) -> SyncResult<usize> {
        let stdout = self.run(&count_args(filter)).await?;
        parse_count(&stdout)
    }

    async fn insert(&self, task: &NewTask) -> SyncResult<()> {
        self.run(&add_args(task, &Local)).await?;
        Ok(())
    }
}

/// Overrides passed on every invocation, so the user's taskrc needs no edits.
fn rc_overrides() -> Vec<String> {
    vec![
        "rc.confirmation:off".to_string(),
        "rc.verbose:nothing".to_string(),
        format!("rc.uda.{EVENT_ID_UDA}.type:string"),
        format!("rc.uda.{EVENT_ID_UDA}.label:Calendar event"),
    ]
}

/// `task <rc> project.is:'P' <key> count`
///
/// `project:` would also match subprojects such as `P.child`.
pub fn count_args(filter: &TaskFilter) -> Vec<String> {
    let mut args = rc_overrides();
    args.push(format!("project.is:{}", quote(filter.project.as_str())));
    args.push(match &filter.key {
        MatchKey::EventId(id) => format!("{EVENT_ID_UDA}:{}", quote(id)),
        MatchKey::Description(desc) => format!("description.is:{}", quote(desc)),
    });
    args.push("count".to_string());
    args
}

/// `task <rc> add project:'P' due:.. until:.. twgcalsid:.. +tags -- summary`
///
/// The summary goes after `--` so nothing in it is read as an attribute.
pub fn add_args<Tz: TimeZone>(task: &NewTask, tz: &Tz) -> Vec<String>
where
    Tz::Offset: std::fmt::Display,
{
    let mut args = rc_overrides();
    args.push(DATE_FORMAT_DIRECTIVE.to_string());
    args.push("add".to_string());
    args.push(format!("project:{}", quote(task.project.as_str())));
    args.push(format!("due:{}", task.due.render_in(tz)));
    args.push(format!("until:{}", task.until.render_in(tz)));
    args.push(format!("{EVENT_ID_UDA}:{}", quote(&task.event_id)));
    args.extend(task.tags.iter().map(|tag| format!("+{tag}")));
    args.push("--".to_string());
    args.push(task.description.clone());
    args
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "\\'"))
}

fn parse_count(stdout: &str) -> SyncResult<usize> {
    let trimmed = stdout.trim();
    trimmed
        .parse()
        .map_err(|_| SyncError::TaskStore(format!("unexpected output from task count: {trimmed:?}")))
}
