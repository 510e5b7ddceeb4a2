//! `PostgreSQL` adapter for dashboard persistence.

mod models;
mod repository;
mod schema;

pub use repository::{DashboardPgPool, PostgresDashboardStore};
