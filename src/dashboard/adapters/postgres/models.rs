//! Diesel row models for dashboard persistence.

use super::schema::dashboards;
use crate::dashboard::domain::{
    Dashboard, DashboardId, DashboardName, PersistedDashboardData,
};
use crate::dashboard::ports::{DashboardStoreError, DashboardStoreResult};
use diesel::prelude::*;

/// Query result row for dashboard records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dashboards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DashboardRow {
    /// Dashboard identifier.
    pub id: uuid::Uuid,
    /// Dashboard name.
    pub name: String,
}

/// Insert model for dashboard records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = dashboards)]
pub struct NewDashboardRow {
    /// Dashboard identifier.
    pub id: uuid::Uuid,
    /// Dashboard name.
    pub name: String,
}

/// Converts a domain dashboard to an insert row.
pub fn to_new_row(dashboard: &Dashboard) -> NewDashboardRow {
    NewDashboardRow {
        id: dashboard.id().into_inner(),
        name: dashboard.name().as_str().to_owned(),
    }
}

/// Converts a stored row back to the domain aggregate.
pub fn row_to_dashboard(row: DashboardRow) -> DashboardStoreResult<Dashboard> {
    let name = DashboardName::new(row.name).map_err(DashboardStoreError::persistence)?;
    Ok(Dashboard::from_persisted(PersistedDashboardData {
        id: DashboardId::from_uuid(row.id),
        name,
    }))
}
