//! Domain model for dashboards.

mod dashboard;
mod error;
mod ids;

pub use dashboard::{Dashboard, DashboardName, PersistedDashboardData};
pub use error::DashboardDomainError;
pub use ids::DashboardId;
