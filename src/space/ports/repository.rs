//! Repository port for space and membership persistence.

use crate::space::domain::{Membership, Space, SpaceId, SpaceRole};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for space store operations.
pub type SpaceStoreResult<T> = Result<T, SpaceStoreError>;

/// Space and membership persistence contract.
#[async_trait]
pub trait SpaceStore: Send + Sync {
    /// Stores a new space together with its creator's admin membership as a
    /// single atomic unit: if either insert fails, neither is visible.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceStoreError::DuplicateSpace`] when the space ID already
    /// exists.
    async fn create_space(
        &self,
        space: &Space,
        creator_membership: &Membership,
    ) -> SpaceStoreResult<()>;

    /// Finds a space by identifier.
    ///
    /// Returns `None` when the space does not exist.
    async fn find_space(&self, id: SpaceId) -> SpaceStoreResult<Option<Space>>;

    /// Inserts or overwrites a membership (last-writer-wins on role).
    async fn upsert_member(&self, membership: &Membership) -> SpaceStoreResult<()>;

    /// Returns the role a user holds in a space.
    ///
    /// Absence of a membership row is not an error; it yields `None`.
    async fn find_role(&self, space: SpaceId, user: UserId) -> SpaceStoreResult<Option<SpaceRole>>;

    /// Returns every space the user holds a membership in.
    async fn spaces_for_user(&self, user: UserId) -> SpaceStoreResult<Vec<Space>>;

    /// Deletes a space, cascading its memberships in the same atomic unit.
    ///
    /// Returns whether a space row was removed.
    async fn delete_space(&self, id: SpaceId) -> SpaceStoreResult<bool>;
}

/// Errors returned by space store implementations.
#[derive(Debug, Clone, Error)]
pub enum SpaceStoreError {
    /// A space with the same identifier already exists.
    #[error("duplicate space identifier: {0}")]
    DuplicateSpace(SpaceId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SpaceStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
