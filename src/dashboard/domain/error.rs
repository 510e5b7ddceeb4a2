//! Error types for dashboard domain validation.

use thiserror::Error;

/// Errors returned while constructing domain dashboard values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DashboardDomainError {
    /// The dashboard name is empty after trimming.
    #[error("dashboard name must not be empty")]
    EmptyDashboardName,
}
