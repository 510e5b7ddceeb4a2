//! Task aggregate root and validated title scalar.

use super::{ApprovalStatus, TaskDomainError, TaskGuardError, TaskId, TaskPatch, TaskStatus};
use crate::dashboard::domain::DashboardId;
use crate::space::domain::SpaceId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(normalized))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task aggregate root.
///
/// The status is caller-driven; only entry into [`TaskStatus::Done`] runs
/// through the guard in [`Task::complete`]. `updated_at` never precedes
/// `created_at` and every mutation refreshes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    deadline: Option<String>,
    space: Option<SpaceId>,
    dashboard: Option<DashboardId>,
    reporter: UserId,
    assigner: Option<UserId>,
    reviewer: Option<UserId>,
    approver: UserId,
    status: TaskStatus,
    approval: ApprovalStatus,
    blocked_by: Vec<TaskId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    done_at: Option<DateTime<Utc>>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Validated title.
    pub title: TaskTitle,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional free-text deadline.
    pub deadline: Option<String>,
    /// Space the task belongs to.
    pub space: SpaceId,
    /// Optional dashboard grouping.
    pub dashboard: Option<DashboardId>,
    /// User reporting the task.
    pub reporter: UserId,
    /// Optional user assigned to the work.
    pub assigner: Option<UserId>,
    /// Optional reviewer.
    pub reviewer: Option<UserId>,
    /// User whose approval gates completion.
    pub approver: UserId,
    /// Initial approval state.
    pub approval: ApprovalStatus,
    /// Initial blocking set; ids are not validated for existence.
    pub blocked_by: Vec<TaskId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted free-text deadline, if any.
    pub deadline: Option<String>,
    /// Persisted space reference, if any.
    pub space: Option<SpaceId>,
    /// Persisted dashboard reference, if any.
    pub dashboard: Option<DashboardId>,
    /// Persisted reporter.
    pub reporter: UserId,
    /// Persisted assigner, if any.
    pub assigner: Option<UserId>,
    /// Persisted reviewer, if any.
    pub reviewer: Option<UserId>,
    /// Persisted approver.
    pub approver: UserId,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted approval state.
    pub approval: ApprovalStatus,
    /// Persisted blocking set.
    pub blocked_by: Vec<TaskId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted work-start timestamp, if any.
    pub started_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub done_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task with status `to-do` at the given instant.
    #[must_use]
    pub fn new(data: NewTaskData, now: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            deadline: data.deadline,
            space: Some(data.space),
            dashboard: data.dashboard,
            reporter: data.reporter,
            assigner: data.assigner,
            reviewer: data.reviewer,
            approver: data.approver,
            status: TaskStatus::ToDo,
            approval: data.approval,
            blocked_by: data.blocked_by,
            created_at: now,
            updated_at: now,
            started_at: None,
            done_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            deadline: data.deadline,
            space: data.space,
            dashboard: data.dashboard,
            reporter: data.reporter,
            assigner: data.assigner,
            reviewer: data.reviewer,
            approver: data.approver,
            status: data.status,
            approval: data.approval,
            blocked_by: data.blocked_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
            started_at: data.started_at,
            done_at: data.done_at,
        }
    }

    /// Applies a sparse patch, refreshing `updated_at` unconditionally.
    ///
    /// An empty patch is a valid touch-only update. Replacing the blocking
    /// set replaces it wholesale; blocker ids are not checked for existence
    /// or cycles.
    pub fn apply_patch(&mut self, patch: &TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        self.description = patch.description.clone().resolve(self.description.take());
        self.deadline = patch.deadline.clone().resolve(self.deadline.take());
        self.space = patch.space.resolve(self.space);
        self.dashboard = patch.dashboard.resolve(self.dashboard);
        self.assigner = patch.assigner.resolve(self.assigner);
        self.reviewer = patch.reviewer.resolve(self.reviewer);
        if let Some(approver) = patch.approver {
            self.approver = approver;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(approval) = patch.approval {
            self.approval = approval;
        }
        self.started_at = patch.started_at.resolve(self.started_at);
        if let Some(blocked_by) = &patch.blocked_by {
            self.blocked_by = blocked_by.clone();
        }
        self.updated_at = now;
    }

    /// Runs the done guard and, when it passes, stamps completion.
    ///
    /// Completing a task that is already done is an idempotent no-op: the
    /// stored `done_at` is preserved, not re-stamped.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGuardError::Blocked`] while the blocking set is
    /// non-empty and [`TaskGuardError::ApprovalPending`] while the approval
    /// state counts as pending.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), TaskGuardError> {
        if self.status == TaskStatus::Done {
            return Ok(());
        }
        if !self.blocked_by.is_empty() {
            return Err(TaskGuardError::Blocked {
                task: self.id,
                blockers: self.blocked_by.clone(),
            });
        }
        if self.approval.is_pending() {
            return Err(TaskGuardError::ApprovalPending {
                task: self.id,
                approval: self.approval,
            });
        }

        self.status = TaskStatus::Done;
        self.done_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the free-text deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<&str> {
        self.deadline.as_deref()
    }

    /// Returns the space reference, if any.
    #[must_use]
    pub const fn space(&self) -> Option<SpaceId> {
        self.space
    }

    /// Returns the dashboard reference, if any.
    #[must_use]
    pub const fn dashboard(&self) -> Option<DashboardId> {
        self.dashboard
    }

    /// Returns the reporter.
    #[must_use]
    pub const fn reporter(&self) -> UserId {
        self.reporter
    }

    /// Returns the assigner, if any.
    #[must_use]
    pub const fn assigner(&self) -> Option<UserId> {
        self.assigner
    }

    /// Returns the reviewer, if any.
    #[must_use]
    pub const fn reviewer(&self) -> Option<UserId> {
        self.reviewer
    }

    /// Returns the approver.
    #[must_use]
    pub const fn approver(&self) -> UserId {
        self.approver
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the approval state.
    #[must_use]
    pub const fn approval(&self) -> ApprovalStatus {
        self.approval
    }

    /// Returns the blocking set.
    #[must_use]
    pub fn blocked_by(&self) -> &[TaskId] {
        &self.blocked_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the work-start timestamp, if any.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn done_at(&self) -> Option<DateTime<Utc>> {
        self.done_at
    }
}
