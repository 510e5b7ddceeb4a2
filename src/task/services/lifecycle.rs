//! Service layer for the task lifecycle engine.
//!
//! The engine owns no state beyond `Arc` handles to its stores; any number
//! of clones may run concurrently. Compound guards serialize inside the
//! task store, not here.

use crate::dashboard::{
    domain::DashboardId,
    ports::{DashboardStore, DashboardStoreError},
};
use crate::deadline;
use crate::space::{
    domain::SpaceId,
    ports::{SpaceStore, SpaceStoreError},
    services::{AccessError, AccessPolicy},
};
use crate::task::{
    domain::{
        ApprovalStatus, NewTaskData, Task, TaskDomainError, TaskGuardError, TaskId, TaskPatch,
        TaskTitle,
    },
    ports::{TaskStore, TaskStoreError},
};
use crate::user::{
    domain::UserId,
    ports::{UserStore, UserStoreError},
};
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    deadline: Option<String>,
    space: Option<SpaceId>,
    dashboard: Option<DashboardId>,
    reporter: UserId,
    assigner: Option<UserId>,
    reviewer: Option<UserId>,
    approver: UserId,
    approval: Option<ApprovalStatus>,
    blocked_by: Vec<TaskId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, reporter: UserId, approver: UserId) -> Self {
        Self {
            title: title.into(),
            description: None,
            deadline: None,
            space: None,
            dashboard: None,
            reporter,
            assigner: None,
            reviewer: None,
            approver,
            approval: None,
            blocked_by: Vec::new(),
        }
    }

    /// Sets the owning space. Creation is rejected without one.
    #[must_use]
    pub const fn in_space(mut self, space: SpaceId) -> Self {
        self.space = Some(space);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the free-text deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Sets the dashboard grouping.
    #[must_use]
    pub const fn on_dashboard(mut self, dashboard: DashboardId) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    /// Sets the assigned user.
    #[must_use]
    pub const fn with_assigner(mut self, assigner: UserId) -> Self {
        self.assigner = Some(assigner);
        self
    }

    /// Sets the reviewer.
    #[must_use]
    pub const fn with_reviewer(mut self, reviewer: UserId) -> Self {
        self.reviewer = Some(reviewer);
        self
    }

    /// Sets the initial approval state; defaults to `need-approval`.
    #[must_use]
    pub const fn with_approval(mut self, approval: ApprovalStatus) -> Self {
        self.approval = Some(approval);
        self
    }

    /// Sets the initial blocking set. Ids are not validated for existence.
    #[must_use]
    pub fn blocked_by(mut self, blockers: impl IntoIterator<Item = TaskId>) -> Self {
        self.blocked_by = blockers.into_iter().collect();
        self
    }
}

/// Task enriched with display names for its references.
///
/// Enrichment is best-effort over weak references: a vanished user or
/// dashboard yields `None`, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// The task itself.
    pub task: Task,
    /// Reporter display name, when the user still exists.
    pub reporter_name: Option<String>,
    /// Assigner display name, when set and the user still exists.
    pub assigner_name: Option<String>,
    /// Reviewer display name, when set and the user still exists.
    pub reviewer_name: Option<String>,
    /// Approver display name, when the user still exists.
    pub approver_name: Option<String>,
    /// Dashboard name, when referenced and it still exists.
    pub dashboard_name: Option<String>,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskFlowError {
    /// Input failed domain validation before any persistence call.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The acting user lacks the required membership.
    #[error(transparent)]
    Authorization(AccessError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The done guard rejected the transition.
    #[error(transparent)]
    Guard(TaskGuardError),

    /// The configured deadline elapsed before the store call finished.
    #[error("operation aborted: deadline exceeded")]
    DeadlineExceeded,

    /// Task store infrastructure failure.
    #[error("task store error: {0}")]
    Store(TaskStoreError),

    /// Membership registry infrastructure failure.
    #[error("membership registry error: {0}")]
    Registry(SpaceStoreError),

    /// User directory infrastructure failure during enrichment.
    #[error("user directory error: {0}")]
    Directory(UserStoreError),

    /// Dashboard store infrastructure failure during enrichment.
    #[error("dashboard store error: {0}")]
    Dashboards(DashboardStoreError),
}

impl TaskFlowError {
    /// Returns whether the caller may retry the operation unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DeadlineExceeded
                | Self::Store(TaskStoreError::Persistence(_))
                | Self::Registry(SpaceStoreError::Persistence(_))
                | Self::Directory(UserStoreError::Persistence(_))
                | Self::Dashboards(DashboardStoreError::Persistence(_))
                | Self::Authorization(AccessError::Registry(SpaceStoreError::Persistence(_)))
        )
    }
}

impl From<TaskStoreError> for TaskFlowError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(id) => Self::NotFound(id),
            TaskStoreError::Guard(guard) => Self::Guard(guard),
            other => Self::Store(other),
        }
    }
}

impl From<AccessError> for TaskFlowError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Registry(store) => Self::Registry(store),
            denied => Self::Authorization(denied),
        }
    }
}

impl From<UserStoreError> for TaskFlowError {
    fn from(err: UserStoreError) -> Self {
        Self::Directory(err)
    }
}

impl From<DashboardStoreError> for TaskFlowError {
    fn from(err: DashboardStoreError) -> Self {
        Self::Dashboards(err)
    }
}

/// Result type for task lifecycle service operations.
pub type TaskFlowResult<T> = Result<T, TaskFlowError>;

/// Task lifecycle orchestration service: creation, patching, the guarded
/// done transition, deletion, and enriched retrieval.
pub struct TaskFlowService<T, S, U, D, C>
where
    T: TaskStore,
    S: SpaceStore,
    U: UserStore,
    D: DashboardStore,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    access: AccessPolicy<S>,
    users: Arc<U>,
    dashboards: Arc<D>,
    clock: Arc<C>,
    op_deadline: Option<Duration>,
}

// Cloning duplicates the `Arc` handles only; the store and clock type
// parameters need not be `Clone`, which a derive would demand.
impl<T, S, U, D, C> Clone for TaskFlowService<T, S, U, D, C>
where
    T: TaskStore,
    S: SpaceStore,
    U: UserStore,
    D: DashboardStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            access: self.access.clone(),
            users: Arc::clone(&self.users),
            dashboards: Arc::clone(&self.dashboards),
            clock: Arc::clone(&self.clock),
            op_deadline: self.op_deadline,
        }
    }
}

impl<T, S, U, D, C> TaskFlowService<T, S, U, D, C>
where
    T: TaskStore,
    S: SpaceStore,
    U: UserStore,
    D: DashboardStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(
        tasks: Arc<T>,
        registry: Arc<S>,
        users: Arc<U>,
        dashboards: Arc<D>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            access: AccessPolicy::new(registry),
            users,
            dashboards,
            clock,
            op_deadline: None,
        }
    }

    /// Bounds every store-facing operation with a deadline.
    #[must_use]
    pub const fn with_op_deadline(mut self, limit: Duration) -> Self {
        self.op_deadline = Some(limit);
        self
    }

    async fn bounded<F>(&self, future: F) -> TaskFlowResult<F::Output>
    where
        F: Future + Send,
    {
        deadline::bounded(self.op_deadline, future)
            .await
            .ok_or(TaskFlowError::DeadlineExceeded)
    }

    /// Creates a task in a space on behalf of its reporter.
    ///
    /// The status starts at `to-do`; approval defaults to `need-approval`
    /// unless the request says otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Validation`] when the request names no space
    /// or the title is empty, and [`TaskFlowError::Authorization`] when the
    /// reporter is not a member of the space, regardless of other field
    /// validity.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskFlowResult<Task> {
        let space = request.space.ok_or(TaskDomainError::MissingSpace)?;
        self.bounded(self.access.require_member(space, request.reporter))
            .await??;

        let title = TaskTitle::new(request.title)?;
        let task = Task::new(
            NewTaskData {
                title,
                description: request.description,
                deadline: request.deadline,
                space,
                dashboard: request.dashboard,
                reporter: request.reporter,
                assigner: request.assigner,
                reviewer: request.reviewer,
                approver: request.approver,
                approval: request.approval.unwrap_or(ApprovalStatus::NeedApproval),
                blocked_by: request.blocked_by,
            },
            self.clock.utc(),
        );

        self.bounded(self.tasks.insert(&task)).await??;
        Ok(task)
    }

    /// Applies a sparse patch to a task.
    ///
    /// Absent fields keep their stored values; an empty patch still
    /// refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::NotFound`] for an unknown id.
    pub async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskFlowResult<Task> {
        let now = self.clock.utc();
        let task = self.bounded(self.tasks.apply_patch(id, patch, now)).await??;
        Ok(task)
    }

    /// Marks a task done, subject to the completion guard.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Guard`] naming the blockers or the pending
    /// approval state, and [`TaskFlowError::NotFound`] for an unknown id.
    pub async fn mark_task_done(&self, id: TaskId) -> TaskFlowResult<Task> {
        let now = self.clock.utc();
        let task = self.bounded(self.tasks.complete(id, now)).await??;
        Ok(task)
    }

    /// Deletes a task unconditionally; repeated deletes succeed.
    ///
    /// Blocking sets of other tasks are left untouched, so a deleted blocker
    /// keeps blocking until patched away.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Store`] when persistence fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskFlowResult<()> {
        self.bounded(self.tasks.delete(id)).await??;
        Ok(())
    }

    /// Returns all tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Store`] when the listing fails.
    pub async fn list_tasks(&self) -> TaskFlowResult<Vec<Task>> {
        let tasks = self.bounded(self.tasks.find_all()).await??;
        Ok(tasks)
    }

    /// Returns all tasks grouped under a dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::Store`] when the listing fails.
    pub async fn tasks_on_dashboard(&self, dashboard: DashboardId) -> TaskFlowResult<Vec<Task>> {
        let tasks = self
            .bounded(self.tasks.find_by_dashboard(dashboard))
            .await??;
        Ok(tasks)
    }

    /// Retrieves a task enriched with the display names of its references.
    ///
    /// # Errors
    ///
    /// Returns [`TaskFlowError::NotFound`] for an unknown id. Vanished
    /// references degrade to `None` enrichment fields; only infrastructure
    /// failures propagate.
    pub async fn get_task(&self, id: TaskId) -> TaskFlowResult<TaskDetails> {
        let task = self
            .bounded(self.tasks.find_by_id(id))
            .await??
            .ok_or(TaskFlowError::NotFound(id))?;

        let reporter_name = self.display_name(Some(task.reporter())).await?;
        let assigner_name = self.display_name(task.assigner()).await?;
        let reviewer_name = self.display_name(task.reviewer()).await?;
        let approver_name = self.display_name(Some(task.approver())).await?;
        let dashboard_name = match task.dashboard() {
            Some(dashboard) => self
                .bounded(self.dashboards.find_by_id(dashboard))
                .await??
                .map(|dashboard| dashboard.name().as_str().to_owned()),
            None => None,
        };

        Ok(TaskDetails {
            task,
            reporter_name,
            assigner_name,
            reviewer_name,
            approver_name,
            dashboard_name,
        })
    }

    async fn display_name(&self, reference: Option<UserId>) -> TaskFlowResult<Option<String>> {
        let Some(id) = reference else {
            return Ok(None);
        };
        let found = self.bounded(self.users.find_by_id(id)).await??;
        Ok(found.map(|user| user.name().full()))
    }
}
