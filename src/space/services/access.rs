//! Reusable authorization predicate over the membership registry.
//!
//! Every space-scoped mutation funnels through [`AccessPolicy`] rather than
//! re-implementing membership checks per call site. Authorization rejections
//! are distinct from validation failures and from registry infrastructure
//! errors; they reveal nothing about the space beyond the denial itself.

use crate::space::{
    domain::{SpaceId, SpaceRole},
    ports::{SpaceStore, SpaceStoreError},
};
use crate::user::domain::UserId;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by authorization checks.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// The user holds no membership in the space.
    #[error("user {user} is not a member of space {space}")]
    NotAMember {
        /// Space the check ran against.
        space: SpaceId,
        /// User that was checked.
        user: UserId,
    },

    /// The user's role does not satisfy the required role.
    #[error("user {user} requires role '{required}' in space {space}")]
    RoleDenied {
        /// Space the check ran against.
        space: SpaceId,
        /// User that was checked.
        user: UserId,
        /// Role the operation requires.
        required: SpaceRole,
    },

    /// Membership registry infrastructure failure.
    #[error(transparent)]
    Registry(#[from] SpaceStoreError),
}

/// Authorization predicate shared by all space-scoped mutations.
pub struct AccessPolicy<S>
where
    S: SpaceStore,
{
    registry: Arc<S>,
}

// Cloning duplicates the registry handle only; `S` itself need not be
// `Clone`, which a derive would demand.
impl<S> Clone for AccessPolicy<S>
where
    S: SpaceStore,
{
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<S> AccessPolicy<S>
where
    S: SpaceStore,
{
    /// Creates a policy over the given registry.
    #[must_use]
    pub const fn new(registry: Arc<S>) -> Self {
        Self { registry }
    }

    /// Returns the role a user holds in a space, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Registry`] when the registry lookup fails.
    pub async fn membership(
        &self,
        space: SpaceId,
        user: UserId,
    ) -> Result<Option<SpaceRole>, AccessError> {
        Ok(self.registry.find_role(space, user).await?)
    }

    /// Requires any membership in the space.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAMember`] when the user holds no membership
    /// and [`AccessError::Registry`] on lookup failure.
    pub async fn require_member(
        &self,
        space: SpaceId,
        user: UserId,
    ) -> Result<SpaceRole, AccessError> {
        self.membership(space, user)
            .await?
            .ok_or(AccessError::NotAMember { space, user })
    }

    /// Requires a membership satisfying `required`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAMember`] for non-members,
    /// [`AccessError::RoleDenied`] when the held role does not satisfy the
    /// requirement, and [`AccessError::Registry`] on lookup failure.
    pub async fn require_role(
        &self,
        space: SpaceId,
        user: UserId,
        required: SpaceRole,
    ) -> Result<SpaceRole, AccessError> {
        let held = self.require_member(space, user).await?;
        if !held.admits(required) {
            return Err(AccessError::RoleDenied {
                space,
                user,
                required,
            });
        }
        Ok(held)
    }
}
