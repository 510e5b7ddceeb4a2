//! In-memory adapter for the dashboard directory.

mod repository;

pub use repository::InMemoryDashboardStore;
