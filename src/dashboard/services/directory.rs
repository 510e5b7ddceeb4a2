//! Service layer for dashboard creation and lookup.

use crate::dashboard::{
    domain::{Dashboard, DashboardDomainError, DashboardId, DashboardName},
    ports::{DashboardStore, DashboardStoreError},
};
use crate::deadline;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Service-level errors for dashboard directory operations.
#[derive(Debug, Error)]
pub enum DashboardDirectoryError {
    /// Input failed domain validation before any persistence call.
    #[error(transparent)]
    Validation(#[from] DashboardDomainError),

    /// The dashboard does not exist.
    #[error("dashboard not found: {0}")]
    NotFound(DashboardId),

    /// The configured deadline elapsed before the store call finished.
    #[error("operation aborted: deadline exceeded")]
    DeadlineExceeded,

    /// Store infrastructure failure.
    #[error("dashboard store error: {0}")]
    Store(#[from] DashboardStoreError),
}

impl DashboardDirectoryError {
    /// Returns whether the caller may retry the operation unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DeadlineExceeded | Self::Store(DashboardStoreError::Persistence(_))
        )
    }
}

/// Result type for dashboard directory service operations.
pub type DashboardDirectoryResult<T> = Result<T, DashboardDirectoryError>;

/// Dashboard creation and lookup service.
///
/// No authorization applies: dashboards are unscoped and any caller may
/// create or list them. Duplicate names are allowed.
pub struct DashboardDirectoryService<D>
where
    D: DashboardStore,
{
    store: Arc<D>,
    op_deadline: Option<Duration>,
}

// Cloning duplicates the store handle only; `D` itself need not be
// `Clone`, which a derive would demand.
impl<D> Clone for DashboardDirectoryService<D>
where
    D: DashboardStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            op_deadline: self.op_deadline,
        }
    }
}

impl<D> DashboardDirectoryService<D>
where
    D: DashboardStore,
{
    /// Creates a new dashboard directory service.
    #[must_use]
    pub const fn new(store: Arc<D>) -> Self {
        Self {
            store,
            op_deadline: None,
        }
    }

    /// Bounds every store-facing operation with a deadline.
    #[must_use]
    pub const fn with_op_deadline(mut self, limit: Duration) -> Self {
        self.op_deadline = Some(limit);
        self
    }

    async fn bounded<F>(&self, future: F) -> DashboardDirectoryResult<F::Output>
    where
        F: Future + Send,
    {
        deadline::bounded(self.op_deadline, future)
            .await
            .ok_or(DashboardDirectoryError::DeadlineExceeded)
    }

    /// Creates a dashboard with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardDirectoryError::Validation`] for an empty name and
    /// [`DashboardDirectoryError::Store`] when persistence fails.
    pub async fn create_dashboard(&self, name: &str) -> DashboardDirectoryResult<Dashboard> {
        let dashboard_name = DashboardName::new(name)?;
        let dashboard = Dashboard::new(dashboard_name);
        self.bounded(self.store.insert(&dashboard)).await??;
        Ok(dashboard)
    }

    /// Retrieves a dashboard by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardDirectoryError::NotFound`] for an unknown id,
    /// distinct from infrastructure failures.
    pub async fn get_dashboard(&self, id: DashboardId) -> DashboardDirectoryResult<Dashboard> {
        self.bounded(self.store.find_by_id(id))
            .await??
            .ok_or(DashboardDirectoryError::NotFound(id))
    }

    /// Returns all dashboards.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardDirectoryError::Store`] when the listing fails.
    pub async fn list_dashboards(&self) -> DashboardDirectoryResult<Vec<Dashboard>> {
        let dashboards = self.bounded(self.store.find_all()).await??;
        Ok(dashboards)
    }
}
