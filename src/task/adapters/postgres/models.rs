//! Diesel row models and changeset mapping for task persistence.

use super::schema::tasks;
use crate::dashboard::domain::DashboardId;
use crate::space::domain::SpaceId;
use crate::task::domain::{
    ApprovalStatus, PersistedTaskData, Task, TaskId, TaskPatch, TaskStatus, TaskTitle,
};
use crate::task::ports::{TaskStoreError, TaskStoreResult};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Free-text deadline.
    pub deadline: Option<String>,
    /// Owning space, if any.
    pub space_id: Option<uuid::Uuid>,
    /// Dashboard grouping, if any.
    pub dashboard_id: Option<uuid::Uuid>,
    /// Reporter user identifier.
    pub reporter_id: uuid::Uuid,
    /// Assigned user identifier, if any.
    pub assigner_id: Option<uuid::Uuid>,
    /// Reviewer user identifier, if any.
    pub reviewer_id: Option<uuid::Uuid>,
    /// Approver user identifier.
    pub approver_id: uuid::Uuid,
    /// Lifecycle status storage string.
    pub status: String,
    /// Approval state storage string.
    pub approval: String,
    /// Identifiers of tasks blocking completion.
    pub blocked_by: Vec<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Work-start timestamp, if any.
    pub started_at: Option<DateTime<Utc>>,
    /// Completion timestamp, if any.
    pub done_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Free-text deadline.
    pub deadline: Option<String>,
    /// Owning space, if any.
    pub space_id: Option<uuid::Uuid>,
    /// Dashboard grouping, if any.
    pub dashboard_id: Option<uuid::Uuid>,
    /// Reporter user identifier.
    pub reporter_id: uuid::Uuid,
    /// Assigned user identifier, if any.
    pub assigner_id: Option<uuid::Uuid>,
    /// Reviewer user identifier, if any.
    pub reviewer_id: Option<uuid::Uuid>,
    /// Approver user identifier.
    pub approver_id: uuid::Uuid,
    /// Lifecycle status storage string.
    pub status: String,
    /// Approval state storage string.
    pub approval: String,
    /// Identifiers of tasks blocking completion.
    pub blocked_by: Vec<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Work-start timestamp, if any.
    pub started_at: Option<DateTime<Utc>>,
    /// Completion timestamp, if any.
    pub done_at: Option<DateTime<Utc>>,
}

/// Sparse update model for task records.
///
/// `None` on an outer `Option` skips the column; `Some(None)` writes NULL.
/// `updated_at` is unconditional so even an empty patch touches the row.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Title replacement, when present.
    pub title: Option<String>,
    /// Description update.
    pub description: Option<Option<String>>,
    /// Deadline update.
    pub deadline: Option<Option<String>>,
    /// Space reference update.
    pub space_id: Option<Option<uuid::Uuid>>,
    /// Dashboard reference update.
    pub dashboard_id: Option<Option<uuid::Uuid>>,
    /// Assigner update.
    pub assigner_id: Option<Option<uuid::Uuid>>,
    /// Reviewer update.
    pub reviewer_id: Option<Option<uuid::Uuid>>,
    /// Approver replacement, when present.
    pub approver_id: Option<uuid::Uuid>,
    /// Status replacement, when present.
    pub status: Option<String>,
    /// Approval state replacement, when present.
    pub approval: Option<String>,
    /// Blocking-set replacement, when present.
    pub blocked_by: Option<Vec<uuid::Uuid>>,
    /// Work-start timestamp update.
    pub started_at: Option<Option<DateTime<Utc>>>,
    /// Unconditional mutation timestamp refresh.
    pub updated_at: DateTime<Utc>,
}

/// Converts a domain task to an insert row.
pub fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        deadline: task.deadline().map(ToOwned::to_owned),
        space_id: task.space().map(SpaceId::into_inner),
        dashboard_id: task.dashboard().map(DashboardId::into_inner),
        reporter_id: task.reporter().into_inner(),
        assigner_id: task.assigner().map(UserId::into_inner),
        reviewer_id: task.reviewer().map(UserId::into_inner),
        approver_id: task.approver().into_inner(),
        status: task.status().as_str().to_owned(),
        approval: task.approval().as_str().to_owned(),
        blocked_by: task.blocked_by().iter().map(|id| id.into_inner()).collect(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        started_at: task.started_at(),
        done_at: task.done_at(),
    }
}

/// Builds a sparse changeset from a patch at the given instant.
pub fn patch_to_changeset(patch: &TaskPatch, now: DateTime<Utc>) -> TaskChangeset {
    TaskChangeset {
        title: patch.title.as_ref().map(|title| title.as_str().to_owned()),
        description: patch.description.clone().into_changeset(),
        deadline: patch.deadline.clone().into_changeset(),
        space_id: patch
            .space
            .map_value(SpaceId::into_inner)
            .into_changeset(),
        dashboard_id: patch
            .dashboard
            .map_value(DashboardId::into_inner)
            .into_changeset(),
        assigner_id: patch
            .assigner
            .map_value(UserId::into_inner)
            .into_changeset(),
        reviewer_id: patch
            .reviewer
            .map_value(UserId::into_inner)
            .into_changeset(),
        approver_id: patch.approver.map(UserId::into_inner),
        status: patch.status.map(|status| status.as_str().to_owned()),
        approval: patch.approval.map(|approval| approval.as_str().to_owned()),
        blocked_by: patch
            .blocked_by
            .as_ref()
            .map(|blockers| blockers.iter().map(|id| id.into_inner()).collect()),
        started_at: patch.started_at.into_changeset(),
        updated_at: now,
    }
}

/// Converts a stored row back to the domain aggregate.
pub fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskStoreError::persistence)?;
    let status = TaskStatus::try_from(row.status.as_str()).map_err(TaskStoreError::persistence)?;
    let approval =
        ApprovalStatus::try_from(row.approval.as_str()).map_err(TaskStoreError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title,
        description: row.description,
        deadline: row.deadline,
        space: row.space_id.map(SpaceId::from_uuid),
        dashboard: row.dashboard_id.map(DashboardId::from_uuid),
        reporter: UserId::from_uuid(row.reporter_id),
        assigner: row.assigner_id.map(UserId::from_uuid),
        reviewer: row.reviewer_id.map(UserId::from_uuid),
        approver: UserId::from_uuid(row.approver_id),
        status,
        approval,
        blocked_by: row.blocked_by.into_iter().map(TaskId::from_uuid).collect(),
        created_at: row.created_at,
        updated_at: row.updated_at,
        started_at: row.started_at,
        done_at: row.done_at,
    }))
}
