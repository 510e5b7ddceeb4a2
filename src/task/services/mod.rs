//! Orchestration services for the task lifecycle.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, TaskDetails, TaskFlowError, TaskFlowResult, TaskFlowService,
};
