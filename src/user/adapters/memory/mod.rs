//! In-memory adapters for user persistence and authentication.

mod auth;
mod repository;

pub use auth::InMemoryAuthProvider;
pub use repository::InMemoryUserStore;
