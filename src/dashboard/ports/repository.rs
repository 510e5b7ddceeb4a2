//! Repository port for dashboard persistence.

use crate::dashboard::domain::{Dashboard, DashboardId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for dashboard store operations.
pub type DashboardStoreResult<T> = Result<T, DashboardStoreError>;

/// Dashboard persistence contract.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Stores a new dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardStoreError::DuplicateDashboard`] when the
    /// identifier already exists. Duplicate names are allowed.
    async fn insert(&self, dashboard: &Dashboard) -> DashboardStoreResult<()>;

    /// Finds a dashboard by identifier.
    ///
    /// Returns `None` when the dashboard does not exist.
    async fn find_by_id(&self, id: DashboardId) -> DashboardStoreResult<Option<Dashboard>>;

    /// Returns all dashboards.
    async fn find_all(&self) -> DashboardStoreResult<Vec<Dashboard>>;
}

/// Errors returned by dashboard store implementations.
#[derive(Debug, Clone, Error)]
pub enum DashboardStoreError {
    /// A dashboard with the same identifier already exists.
    #[error("duplicate dashboard identifier: {0}")]
    DuplicateDashboard(DashboardId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DashboardStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
