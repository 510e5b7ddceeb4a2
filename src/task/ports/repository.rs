//! Repository port for task persistence.

use crate::dashboard::domain::DashboardId;
use crate::task::domain::{Task, TaskGuardError, TaskId, TaskPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Implementations provide read-your-writes visibility within a logical
/// session: a successful mutation is observable by the next read through the
/// same store handle.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the identifier already
    /// exists.
    async fn insert(&self, task: &Task) -> TaskStoreResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns all tasks.
    async fn find_all(&self) -> TaskStoreResult<Vec<Task>>;

    /// Returns all tasks grouped under a dashboard.
    async fn find_by_dashboard(&self, dashboard: DashboardId) -> TaskStoreResult<Vec<Task>>;

    /// Applies a sparse patch and returns the updated task.
    ///
    /// Only present fields are written; `updated_at` is refreshed
    /// unconditionally, so an empty patch is a deterministic touch-only
    /// update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] for an unknown identifier.
    async fn apply_patch(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        now: DateTime<Utc>,
    ) -> TaskStoreResult<Task>;

    /// Runs the done guard and stamps completion as one atomic
    /// read-check-write; concurrent calls on the same task serialize here.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] for an unknown identifier and
    /// [`TaskStoreError::Guard`] when the guard rejects the transition.
    async fn complete(&self, id: TaskId, now: DateTime<Utc>) -> TaskStoreResult<Task>;

    /// Deletes a task.
    ///
    /// Returns whether a row was removed; deleting an unknown task is a
    /// successful no-op. Blocking sets of other tasks are left untouched.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<bool>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// No task exists with the given identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The done guard rejected the transition.
    #[error(transparent)]
    Guard(#[from] TaskGuardError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
