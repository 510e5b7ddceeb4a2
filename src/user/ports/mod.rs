//! Port contracts for user persistence and authentication.

mod auth;
mod repository;

pub use auth::{AuthError, AuthProvider, Claims, IssuedToken, UserIdentity};
pub use repository::{UserStore, UserStoreError, UserStoreResult};
