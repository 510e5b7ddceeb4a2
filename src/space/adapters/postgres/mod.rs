//! `PostgreSQL` adapter for space and membership persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresSpaceStore, SpacePgPool};
