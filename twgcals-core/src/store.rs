//! Where tasks go.

use crate::error::SyncResult;
use crate::task::{NewTask, TaskFilter};

/// An external task manager.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    /// Number of existing tasks matching `filter`.
    async fn count_matching(&self, filter: &TaskFilter) -> SyncResult<usize>;

    async fn insert(&self, task: &NewTask) -> SyncResult<()>;
}

impl<T: TaskStore> TaskStore for &T {
    async fn count_matching(&self, filter: &TaskFilter) -> SyncResult<usize> {
        (**self).count_matching(filter).await
    }

    async fn insert(&self, task: &NewTask) -> SyncResult<()> {
        (**self).insert(task).await
    }
}
