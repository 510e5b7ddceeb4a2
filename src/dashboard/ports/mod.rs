//! Port contracts for the dashboard directory.

mod repository;

pub use repository::{DashboardStore, DashboardStoreError, DashboardStoreResult};
