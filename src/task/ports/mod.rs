//! Port contracts for the task store.

mod repository;

pub use repository::{TaskStore, TaskStoreError, TaskStoreResult};
