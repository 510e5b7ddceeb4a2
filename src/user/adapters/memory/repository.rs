//! Thread-safe in-memory user store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::{Login, User, UserId},
    ports::{UserStore, UserStoreError, UserStoreResult},
};

/// Thread-safe in-memory user store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    login_index: HashMap<Login, UserId>,
}

impl InMemoryUserStore {
    /// Creates an empty in-memory user store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &User) -> UserStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| UserStoreError::persistence(std::io::Error::other(err.to_string())))?;
        if state.login_index.contains_key(user.login()) {
            return Err(UserStoreError::DuplicateLogin(user.login().clone()));
        }
        state.login_index.insert(user.login().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserStoreResult<Option<User>> {
        let state = self
            .state
            .read()
            .map_err(|err| UserStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &Login) -> UserStoreResult<Option<User>> {
        let state = self
            .state
            .read()
            .map_err(|err| UserStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let user = state
            .login_index
            .get(login)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn find_all(&self) -> UserStoreResult<Vec<User>> {
        let state = self
            .state
            .read()
            .map_err(|err| UserStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.users.values().cloned().collect())
    }
}
