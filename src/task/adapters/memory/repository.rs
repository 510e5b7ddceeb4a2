//! Thread-safe in-memory task store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::dashboard::domain::DashboardId;
use crate::task::{
    domain::{Task, TaskId, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// The compound done guard runs under the write lock, so concurrent
/// `complete` calls on the same task serialize exactly as a storage
/// transaction would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory task store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error(err: impl ToString) -> TaskStoreError {
        TaskStoreError::persistence(std::io::Error::other(err.to_string()))
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let mut tasks = self.tasks.write().map_err(Self::lock_error)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let tasks = self.tasks.read().map_err(Self::lock_error)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn find_all(&self) -> TaskStoreResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(Self::lock_error)?;
        Ok(tasks.values().cloned().collect())
    }

    async fn find_by_dashboard(&self, dashboard: DashboardId) -> TaskStoreResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(Self::lock_error)?;
        Ok(tasks
            .values()
            .filter(|task| task.dashboard() == Some(dashboard))
            .cloned()
            .collect())
    }

    async fn apply_patch(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        now: DateTime<Utc>,
    ) -> TaskStoreResult<Task> {
        let mut tasks = self.tasks.write().map_err(Self::lock_error)?;
        let task = tasks.get_mut(&id).ok_or(TaskStoreError::NotFound(id))?;
        task.apply_patch(patch, now);
        Ok(task.clone())
    }

    async fn complete(&self, id: TaskId, now: DateTime<Utc>) -> TaskStoreResult<Task> {
        let mut tasks = self.tasks.write().map_err(Self::lock_error)?;
        let task = tasks.get_mut(&id).ok_or(TaskStoreError::NotFound(id))?;
        task.complete(now)?;
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<bool> {
        let mut tasks = self.tasks.write().map_err(Self::lock_error)?;
        Ok(tasks.remove(&id).is_some())
    }
}
