//! Orchestration services for dashboards.

mod directory;

pub use directory::{
    DashboardDirectoryError, DashboardDirectoryResult, DashboardDirectoryService,
};
