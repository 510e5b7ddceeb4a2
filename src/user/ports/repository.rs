//! Repository port for user persistence and lookup.

use crate::user::domain::{Login, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user store operations.
pub type UserStoreResult<T> = Result<T, UserStoreError>;

/// User persistence contract.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Stores a newly registered user.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::DuplicateLogin`] when the login is already
    /// registered.
    async fn insert(&self, user: &User) -> UserStoreResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserStoreResult<Option<User>>;

    /// Finds a user by login.
    ///
    /// Returns `None` when no user carries the login.
    async fn find_by_login(&self, login: &Login) -> UserStoreResult<Option<User>>;

    /// Returns all registered users.
    async fn find_all(&self) -> UserStoreResult<Vec<User>>;
}

/// Errors returned by user store implementations.
#[derive(Debug, Clone, Error)]
pub enum UserStoreError {
    /// A user with the same login already exists.
    #[error("duplicate login: {0}")]
    DuplicateLogin(Login),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
