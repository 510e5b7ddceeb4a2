//! Thread-safe in-memory dashboard store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::dashboard::{
    domain::{Dashboard, DashboardId},
    ports::{DashboardStore, DashboardStoreError, DashboardStoreResult},
};

/// Thread-safe in-memory dashboard store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDashboardStore {
    dashboards: Arc<RwLock<HashMap<DashboardId, Dashboard>>>,
}

impl InMemoryDashboardStore {
    /// Creates an empty in-memory dashboard store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error(err: impl ToString) -> DashboardStoreError {
        DashboardStoreError::persistence(std::io::Error::other(err.to_string()))
    }
}

#[async_trait]
impl DashboardStore for InMemoryDashboardStore {
    async fn insert(&self, dashboard: &Dashboard) -> DashboardStoreResult<()> {
        let mut dashboards = self.dashboards.write().map_err(Self::lock_error)?;
        if dashboards.contains_key(&dashboard.id()) {
            return Err(DashboardStoreError::DuplicateDashboard(dashboard.id()));
        }
        dashboards.insert(dashboard.id(), dashboard.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DashboardId) -> DashboardStoreResult<Option<Dashboard>> {
        let dashboards = self.dashboards.read().map_err(Self::lock_error)?;
        Ok(dashboards.get(&id).cloned())
    }

    async fn find_all(&self) -> DashboardStoreResult<Vec<Dashboard>> {
        let dashboards = self.dashboards.read().map_err(Self::lock_error)?;
        Ok(dashboards.values().cloned().collect())
    }
}
