//! Service layer for space creation, invitation, and lookup.

use crate::deadline;
use crate::space::{
    domain::{Membership, Space, SpaceDomainError, SpaceId, SpaceName, SpaceRole},
    ports::{SpaceStore, SpaceStoreError},
    services::{AccessError, AccessPolicy},
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Service-level errors for space directory operations.
#[derive(Debug, Error)]
pub enum SpaceDirectoryError {
    /// Input failed domain validation before any persistence call.
    #[error(transparent)]
    Validation(#[from] SpaceDomainError),

    /// The acting user lacks the required membership or role.
    #[error(transparent)]
    Authorization(AccessError),

    /// The space does not exist.
    #[error("space not found: {0}")]
    NotFound(SpaceId),

    /// The configured deadline elapsed before the store call finished.
    #[error("operation aborted: deadline exceeded")]
    DeadlineExceeded,

    /// Registry infrastructure failure.
    #[error("membership registry error: {0}")]
    Store(SpaceStoreError),
}

impl SpaceDirectoryError {
    /// Returns whether the caller may retry the operation unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DeadlineExceeded
                | Self::Store(SpaceStoreError::Persistence(_))
                | Self::Authorization(AccessError::Registry(SpaceStoreError::Persistence(_)))
        )
    }
}

impl From<SpaceStoreError> for SpaceDirectoryError {
    fn from(err: SpaceStoreError) -> Self {
        Self::Store(err)
    }
}

impl From<AccessError> for SpaceDirectoryError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Registry(store) => Self::Store(store),
            denied => Self::Authorization(denied),
        }
    }
}

/// Result type for space directory service operations.
pub type SpaceDirectoryResult<T> = Result<T, SpaceDirectoryError>;

/// Space creation, invitation, and membership orchestration service.
pub struct SpaceDirectoryService<S, C>
where
    S: SpaceStore,
    C: Clock + Send + Sync,
{
    registry: Arc<S>,
    access: AccessPolicy<S>,
    clock: Arc<C>,
    op_deadline: Option<Duration>,
}

// Cloning duplicates the `Arc` handles only; the store and clock type
// parameters need not be `Clone`, which a derive would demand.
impl<S, C> Clone for SpaceDirectoryService<S, C>
where
    S: SpaceStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            access: self.access.clone(),
            clock: Arc::clone(&self.clock),
            op_deadline: self.op_deadline,
        }
    }
}

impl<S, C> SpaceDirectoryService<S, C>
where
    S: SpaceStore,
    C: Clock + Send + Sync,
{
    /// Creates a new space directory service.
    #[must_use]
    pub fn new(registry: Arc<S>, clock: Arc<C>) -> Self {
        let access = AccessPolicy::new(Arc::clone(&registry));
        Self {
            registry,
            access,
            clock,
            op_deadline: None,
        }
    }

    /// Bounds every store-facing operation with a deadline.
    #[must_use]
    pub const fn with_op_deadline(mut self, limit: Duration) -> Self {
        self.op_deadline = Some(limit);
        self
    }

    /// Returns the shared authorization predicate.
    #[must_use]
    pub const fn access(&self) -> &AccessPolicy<S> {
        &self.access
    }

    async fn bounded<F>(&self, future: F) -> SpaceDirectoryResult<F::Output>
    where
        F: Future + Send,
    {
        deadline::bounded(self.op_deadline, future)
            .await
            .ok_or(SpaceDirectoryError::DeadlineExceeded)
    }

    /// Creates a space and the creator's admin membership as one atomic
    /// unit. Immediately afterwards the creator is observable as "admin".
    ///
    /// # Errors
    ///
    /// Returns [`SpaceDirectoryError::Validation`] for an empty name and
    /// [`SpaceDirectoryError::Store`] when persistence fails; on failure
    /// neither the space nor the membership is visible.
    pub async fn create_space(
        &self,
        name: &str,
        creator: UserId,
    ) -> SpaceDirectoryResult<Space> {
        let space_name = SpaceName::new(name)?;
        let space = Space::new(space_name, creator, &*self.clock);
        let membership = Membership::new(space.id(), creator, SpaceRole::Admin);

        self.bounded(self.registry.create_space(&space, &membership))
            .await??;
        Ok(space)
    }

    /// Invites (or re-roles) a user in a space. Only admins may invite; the
    /// role defaults to member when unspecified. The upsert is idempotent
    /// with last-writer-wins role overwrite.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceDirectoryError::Authorization`] when the inviter is
    /// not an admin of the space.
    pub async fn invite(
        &self,
        space: SpaceId,
        inviter: UserId,
        invitee: UserId,
        role: Option<SpaceRole>,
    ) -> SpaceDirectoryResult<Membership> {
        self.bounded(self.access.require_role(space, inviter, SpaceRole::Admin))
            .await??;

        let membership = Membership::new(space, invitee, role.unwrap_or(SpaceRole::Member));
        self.bounded(self.registry.upsert_member(&membership))
            .await??;
        Ok(membership)
    }

    /// Returns the role a user holds in a space, `None` for non-members.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceDirectoryError::Store`] when the registry lookup
    /// fails.
    pub async fn membership(
        &self,
        space: SpaceId,
        user: UserId,
    ) -> SpaceDirectoryResult<Option<SpaceRole>> {
        let role = self.bounded(self.registry.find_role(space, user)).await??;
        Ok(role)
    }

    /// Returns the spaces a user holds any membership in, in no guaranteed
    /// order. A user with no memberships yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceDirectoryError::Store`] when the registry lookup
    /// fails.
    pub async fn spaces_for(&self, user: UserId) -> SpaceDirectoryResult<Vec<Space>> {
        let spaces = self.bounded(self.registry.spaces_for_user(user)).await??;
        Ok(spaces)
    }

    /// Retrieves a space by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceDirectoryError::NotFound`] for an unknown id, distinct
    /// from infrastructure failures.
    pub async fn get_space(&self, id: SpaceId) -> SpaceDirectoryResult<Space> {
        self.bounded(self.registry.find_space(id))
            .await??
            .ok_or(SpaceDirectoryError::NotFound(id))
    }

    /// Deletes a space, cascading its memberships in the same atomic unit.
    ///
    /// Tasks referencing the space are orphaned, not cascaded: reads
    /// tolerate the dangling reference. Deleting an unknown space succeeds
    /// as a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceDirectoryError::Store`] when persistence fails.
    pub async fn delete_space(&self, id: SpaceId) -> SpaceDirectoryResult<()> {
        self.bounded(self.registry.delete_space(id)).await??;
        Ok(())
    }
}
