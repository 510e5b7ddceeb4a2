//! `PostgreSQL` adapter for user persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresUserStore, UserPgPool};
