//! Typed sparse patch for task updates.

use super::{ApprovalStatus, TaskId, TaskStatus, TaskTitle};
use crate::dashboard::domain::DashboardId;
use crate::space::domain::SpaceId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Update intent for a nullable field.
///
/// Distinguishes "leave the stored value alone" from "set the column to
/// NULL", which a plain `Option` cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldUpdate<T> {
    /// Keep the stored value.
    #[default]
    Keep,
    /// Clear the stored value.
    Clear,
    /// Replace the stored value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Returns whether this update leaves the field untouched.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Resolves the update against the current value.
    #[must_use]
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Keep => current,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }

    /// Maps the carried value, preserving the update intent.
    #[must_use]
    pub fn map_value<U>(self, f: impl FnOnce(T) -> U) -> FieldUpdate<U> {
        match self {
            Self::Keep => FieldUpdate::Keep,
            Self::Clear => FieldUpdate::Clear,
            Self::Set(value) => FieldUpdate::Set(f(value)),
        }
    }

    /// Maps the update into Diesel's double-`Option` changeset shape:
    /// `None` = leave column, `Some(None)` = NULL, `Some(Some(v))` = value.
    #[must_use]
    pub fn into_changeset(self) -> Option<Option<T>> {
        match self {
            Self::Keep => None,
            Self::Clear => Some(None),
            Self::Set(value) => Some(Some(value)),
        }
    }
}

/// Sparse update for a task.
///
/// Non-nullable fields use `Option` (absent keeps the stored value);
/// nullable fields use [`FieldUpdate`]. An all-absent patch is valid and
/// still refreshes `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title, when present.
    pub title: Option<TaskTitle>,
    /// Description update.
    pub description: FieldUpdate<String>,
    /// Free-text deadline update.
    pub deadline: FieldUpdate<String>,
    /// Space reference update.
    pub space: FieldUpdate<SpaceId>,
    /// Dashboard reference update.
    pub dashboard: FieldUpdate<DashboardId>,
    /// Assigner update.
    pub assigner: FieldUpdate<UserId>,
    /// Reviewer update.
    pub reviewer: FieldUpdate<UserId>,
    /// Approver update, when present.
    pub approver: Option<UserId>,
    /// Status update, when present.
    pub status: Option<TaskStatus>,
    /// Approval state update, when present.
    pub approval: Option<ApprovalStatus>,
    /// Work-start timestamp update.
    pub started_at: FieldUpdate<DateTime<Utc>>,
    /// Blocking-set replacement, when present. Replaces wholesale; ids are
    /// not validated against existing tasks.
    pub blocked_by: Option<Vec<TaskId>>,
}

impl TaskPatch {
    /// Creates a patch that keeps every field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the patch carries no field updates.
    ///
    /// An empty patch is still a valid update; it only refreshes
    /// `updated_at`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_keep()
            && self.deadline.is_keep()
            && self.space.is_keep()
            && self.dashboard.is_keep()
            && self.assigner.is_keep()
            && self.reviewer.is_keep()
            && self.approver.is_none()
            && self.status.is_none()
            && self.approval.is_none()
            && self.started_at.is_keep()
            && self.blocked_by.is_none()
    }
}
