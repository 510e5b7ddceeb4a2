//! Error types for task domain validation, parsing, and guards.

use super::{ApprovalStatus, TaskId};
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// Task creation requires a space.
    #[error("task must belong to a space")]
    MissingSpace,
}

/// Errors returned by the guarded transition into the done status.
///
/// Guard failures are business rejections, distinct from validation and from
/// infrastructure faults.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskGuardError {
    /// The task's blocking set is non-empty.
    #[error("task {task} cannot be completed while blockers remain")]
    Blocked {
        /// Task the guard ran against.
        task: TaskId,
        /// Identifiers still blocking completion.
        blockers: Vec<TaskId>,
    },

    /// The task's approval state still counts as pending.
    #[error("task {task} cannot be completed while approval is pending")]
    ApprovalPending {
        /// Task the guard ran against.
        task: TaskId,
        /// Approval state observed at guard time.
        approval: ApprovalStatus,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing approval statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown approval status: {0}")]
pub struct ParseApprovalStatusError(pub String);
