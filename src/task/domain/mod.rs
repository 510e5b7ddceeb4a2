//! Domain model for tasks, statuses, and sparse patches.

mod error;
mod ids;
mod patch;
mod status;
mod task;

pub use error::{
    ParseApprovalStatusError, ParseTaskStatusError, TaskDomainError, TaskGuardError,
};
pub use ids::TaskId;
pub use patch::{FieldUpdate, TaskPatch};
pub use status::{ApprovalStatus, TaskStatus};
pub use task::{NewTaskData, PersistedTaskData, Task, TaskTitle};
