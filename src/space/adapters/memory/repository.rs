//! Thread-safe in-memory space and membership store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::space::{
    domain::{Membership, Space, SpaceId, SpaceRole},
    ports::{SpaceStore, SpaceStoreError, SpaceStoreResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory space store.
///
/// Space creation commits the space row and the creator membership under one
/// write lock, so the atomic-pair contract holds structurally. A one-shot
/// fault can be injected to exercise the all-or-nothing failure path.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpaceStore {
    state: Arc<RwLock<InMemorySpaceState>>,
}

#[derive(Debug, Default)]
struct InMemorySpaceState {
    spaces: HashMap<SpaceId, Space>,
    memberships: HashMap<(SpaceId, UserId), SpaceRole>,
    fail_next_create: bool,
}

impl InMemorySpaceStore {
    /// Creates an empty in-memory space store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `create_space` call fail with a persistence error
    /// without committing either row. Test support for the atomicity
    /// contract.
    pub fn fail_next_create_space(&self) {
        if let Ok(mut state) = self.state.write() {
            state.fail_next_create = true;
        }
    }

    fn lock_error(err: impl ToString) -> SpaceStoreError {
        SpaceStoreError::persistence(std::io::Error::other(err.to_string()))
    }
}

#[async_trait]
impl SpaceStore for InMemorySpaceStore {
    async fn create_space(
        &self,
        space: &Space,
        creator_membership: &Membership,
    ) -> SpaceStoreResult<()> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        if state.fail_next_create {
            state.fail_next_create = false;
            return Err(SpaceStoreError::persistence(std::io::Error::other(
                "injected store fault",
            )));
        }
        if state.spaces.contains_key(&space.id()) {
            return Err(SpaceStoreError::DuplicateSpace(space.id()));
        }

        state.spaces.insert(space.id(), space.clone());
        state.memberships.insert(
            (creator_membership.space, creator_membership.user),
            creator_membership.role,
        );
        Ok(())
    }

    async fn find_space(&self, id: SpaceId) -> SpaceStoreResult<Option<Space>> {
        let state = self.state.read().map_err(Self::lock_error)?;
        Ok(state.spaces.get(&id).cloned())
    }

    async fn upsert_member(&self, membership: &Membership) -> SpaceStoreResult<()> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        state
            .memberships
            .insert((membership.space, membership.user), membership.role);
        Ok(())
    }

    async fn find_role(
        &self,
        space: SpaceId,
        user: UserId,
    ) -> SpaceStoreResult<Option<SpaceRole>> {
        let state = self.state.read().map_err(Self::lock_error)?;
        Ok(state.memberships.get(&(space, user)).copied())
    }

    async fn spaces_for_user(&self, user: UserId) -> SpaceStoreResult<Vec<Space>> {
        let state = self.state.read().map_err(Self::lock_error)?;
        let spaces = state
            .memberships
            .keys()
            .filter(|(_, member)| *member == user)
            .filter_map(|(space, _)| state.spaces.get(space))
            .cloned()
            .collect();
        Ok(spaces)
    }

    async fn delete_space(&self, id: SpaceId) -> SpaceStoreResult<bool> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        let removed = state.spaces.remove(&id).is_some();
        state.memberships.retain(|(space, _), _| *space != id);
        Ok(removed)
    }
}
