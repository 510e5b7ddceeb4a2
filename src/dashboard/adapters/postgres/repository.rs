//! `PostgreSQL` repository implementation for the dashboard directory.

use super::{
    models::{DashboardRow, row_to_dashboard, to_new_row},
    schema::dashboards,
};
use crate::dashboard::{
    domain::{Dashboard, DashboardId},
    ports::{DashboardStore, DashboardStoreError, DashboardStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by dashboard adapters.
pub type DashboardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed dashboard store.
#[derive(Debug, Clone)]
pub struct PostgresDashboardStore {
    pool: DashboardPgPool,
}

impl From<DieselError> for DashboardStoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl PostgresDashboardStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DashboardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DashboardStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DashboardStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DashboardStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DashboardStoreError::persistence)?
    }
}

#[async_trait]
impl DashboardStore for PostgresDashboardStore {
    async fn insert(&self, dashboard: &Dashboard) -> DashboardStoreResult<()> {
        let id = dashboard.id();
        let row = to_new_row(dashboard);

        self.run_blocking(move |connection| {
            diesel::insert_into(dashboards::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DashboardStoreError::DuplicateDashboard(id)
                    }
                    _ => DashboardStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: DashboardId) -> DashboardStoreResult<Option<Dashboard>> {
        self.run_blocking(move |connection| {
            let row = dashboards::table
                .filter(dashboards::id.eq(id.into_inner()))
                .select(DashboardRow::as_select())
                .first::<DashboardRow>(connection)
                .optional()
                .map_err(DashboardStoreError::persistence)?;
            row.map(row_to_dashboard).transpose()
        })
        .await
    }

    async fn find_all(&self) -> DashboardStoreResult<Vec<Dashboard>> {
        self.run_blocking(move |connection| {
            let rows = dashboards::table
                .select(DashboardRow::as_select())
                .load::<DashboardRow>(connection)
                .map_err(DashboardStoreError::persistence)?;
            rows.into_iter().map(row_to_dashboard).collect()
        })
        .await
    }
}
