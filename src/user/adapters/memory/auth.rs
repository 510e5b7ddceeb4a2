//! In-memory authentication provider for tests and local runs.
//!
//! Hashes secrets with SHA-256 and issues opaque UUID bearer tokens with a
//! clock-derived expiry. Production deployments supply their own
//! [`AuthProvider`] behind the same port.

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::user::{
    domain::{CredentialHash, UserId},
    ports::{AuthError, AuthProvider, Claims, IssuedToken, UserIdentity, UserStore},
};

/// In-memory [`AuthProvider`] backed by a user store.
pub struct InMemoryAuthProvider<U, C>
where
    U: UserStore,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    clock: Arc<C>,
    token_ttl: Duration,
    tokens: Arc<RwLock<HashMap<String, Claims>>>,
}

// Clones share the token map; the store and clock parameters need not be
// `Clone`, which a derive would demand.
impl<U, C> Clone for InMemoryAuthProvider<U, C>
where
    U: UserStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            clock: Arc::clone(&self.clock),
            token_ttl: self.token_ttl,
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<U, C> InMemoryAuthProvider<U, C>
where
    U: UserStore,
    C: Clock + Send + Sync,
{
    /// Default validity window for issued tokens.
    const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

    /// Creates a provider over the given user store and clock.
    #[must_use]
    pub fn new(users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            users,
            clock,
            token_ttl: Duration::hours(Self::DEFAULT_TOKEN_TTL_HOURS),
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Overrides the token validity window.
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    fn digest(secret: &str) -> CredentialHash {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        CredentialHash::new(format!("{:x}", hasher.finalize()))
    }

    fn lock_error(err: impl ToString) -> AuthError {
        AuthError::provider(std::io::Error::other(err.to_string()))
    }

    fn record_token(&self, user_id: UserId) -> Result<IssuedToken, AuthError> {
        let expires_at = self.clock.utc() + self.token_ttl;
        let token = Uuid::new_v4().to_string();
        let mut tokens = self.tokens.write().map_err(Self::lock_error)?;
        tokens.insert(token.clone(), Claims { user_id, expires_at });
        Ok(IssuedToken { token, expires_at })
    }
}

#[async_trait]
impl<U, C> AuthProvider for InMemoryAuthProvider<U, C>
where
    U: UserStore,
    C: Clock + Send + Sync,
{
    async fn hash_secret(&self, secret: &str) -> Result<CredentialHash, AuthError> {
        Ok(Self::digest(secret))
    }

    async fn validate_credential(
        &self,
        login: &str,
        secret: &str,
    ) -> Result<UserIdentity, AuthError> {
        let parsed_login = crate::user::domain::Login::new(login)
            .map_err(|_| AuthError::InvalidCredentials)?;
        let user = self
            .users
            .find_by_login(&parsed_login)
            .await
            .map_err(AuthError::provider)?
            .ok_or(AuthError::InvalidCredentials)?;
        if *user.credential() != Self::digest(secret) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(UserIdentity {
            user_id: user.id(),
            login: parsed_login,
        })
    }

    async fn issue_token(&self, identity: &UserIdentity) -> Result<IssuedToken, AuthError> {
        self.record_token(identity.user_id)
    }

    async fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let tokens = self.tokens.read().map_err(Self::lock_error)?;
        let claims = tokens.get(token).ok_or(AuthError::InvalidToken)?.clone();
        if claims.expires_at <= self.clock.utc() {
            return Err(AuthError::TokenExpired);
        }
        Ok(claims)
    }
}
