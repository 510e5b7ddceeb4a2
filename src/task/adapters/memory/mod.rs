//! In-memory adapter for the task store.

mod repository;

pub use repository::InMemoryTaskStore;
