//! Service layer for user registration, authentication, and name lookup.

use crate::user::{
    domain::{DisplayName, Login, RoleId, User, UserDomainError, UserId},
    ports::{AuthError, AuthProvider, IssuedToken, UserIdentity, UserStore, UserStoreError},
};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    given: String,
    family: String,
    middle: Option<String>,
    login: String,
    role: RoleId,
    secret: String,
}

impl RegisterUserRequest {
    /// Creates a request with required registration fields.
    #[must_use]
    pub fn new(
        given: impl Into<String>,
        family: impl Into<String>,
        login: impl Into<String>,
        role: RoleId,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            given: given.into(),
            family: family.into(),
            middle: None,
            login: login.into(),
            role,
            secret: secret.into(),
        }
    }

    /// Sets an optional middle name.
    #[must_use]
    pub fn with_middle(mut self, middle: impl Into<String>) -> Self {
        self.middle = Some(middle.into());
        self
    }
}

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Authentication provider rejected the request.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// User store operation failed.
    #[error(transparent)]
    Store(#[from] UserStoreError),
}

/// Result type for user directory service operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User registration and lookup orchestration service.
pub struct UserDirectoryService<U, A>
where
    U: UserStore,
    A: AuthProvider,
{
    store: Arc<U>,
    auth: Arc<A>,
}

// Cloning duplicates the `Arc` handles only; the store and provider type
// parameters need not be `Clone`, which a derive would demand.
impl<U, A> Clone for UserDirectoryService<U, A>
where
    U: UserStore,
    A: AuthProvider,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            auth: Arc::clone(&self.auth),
        }
    }
}

impl<U, A> UserDirectoryService<U, A>
where
    U: UserStore,
    A: AuthProvider,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(store: Arc<U>, auth: Arc<A>) -> Self {
        Self { store, auth }
    }

    /// Registers a new user, hashing the secret through the auth provider.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError`] when validation fails, the login is
    /// already taken, or persistence fails.
    pub async fn register(&self, request: RegisterUserRequest) -> UserDirectoryResult<User> {
        let RegisterUserRequest {
            given,
            family,
            middle,
            login,
            role,
            secret,
        } = request;

        let mut name = DisplayName::new(given, family)?;
        if let Some(middle_name) = middle {
            name = name.with_middle(middle_name);
        }
        let parsed_login = Login::new(login)?;
        let credential = self.auth.hash_secret(&secret).await?;

        let user = User::register(name, parsed_login, role, credential);
        self.store.insert(&user).await?;
        Ok(user)
    }

    /// Validates a credential pair and issues a token for the identity.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Auth`] when the credentials do not
    /// resolve to a registered identity.
    pub async fn authenticate(
        &self,
        login: &str,
        secret: &str,
    ) -> UserDirectoryResult<(UserIdentity, IssuedToken)> {
        let identity = self.auth.validate_credential(login, secret).await?;
        let token = self.auth.issue_token(&identity).await?;
        Ok((identity, token))
    }

    /// Finds a user by identifier.
    ///
    /// Returns `Ok(None)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Store`] when persistence lookup fails.
    pub async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Returns all registered users, in no guaranteed order.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Store`] when the listing fails.
    pub async fn list_users(&self) -> UserDirectoryResult<Vec<User>> {
        Ok(self.store.find_all().await?)
    }

    /// Resolves the enrichment display name for a user.
    ///
    /// Returns `Ok(None)` when the reference is dangling; a missing user is
    /// never an error on the enrichment path.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Store`] when persistence lookup fails.
    pub async fn display_name(&self, id: UserId) -> UserDirectoryResult<Option<String>> {
        let found = self.store.find_by_id(id).await?;
        Ok(found.map(|user| user.name().full()))
    }
}
