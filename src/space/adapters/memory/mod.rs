//! In-memory adapter for the membership registry.

mod repository;

pub use repository::InMemorySpaceStore;
