//! Authentication provider port.
//!
//! Credential hashing, token issuance, and token verification are external
//! capabilities. The engine consumes them through this port and trusts the
//! user identity carried by validated claims; it never re-verifies tokens.

use crate::user::domain::{CredentialHash, Login, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Identity resolved from a validated credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Identifier of the authenticated user.
    pub user_id: UserId,
    /// Login the identity was resolved from.
    pub login: Login,
}

/// Claims carried by a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the token subject.
    pub user_id: UserId,
    /// Expiry instant of the token.
    pub expires_at: DateTime<Utc>,
}

/// An issued bearer token with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Opaque token value.
    pub token: String,
    /// Expiry instant of the token.
    pub expires_at: DateTime<Utc>,
}

/// Errors returned by authentication providers.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The login/secret pair did not resolve to an identity.
    ///
    /// Covers unknown logins as well as wrong secrets so callers cannot
    /// probe for account existence.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token is unknown or malformed.
    #[error("invalid token")]
    InvalidToken,

    /// The token expired.
    #[error("token expired")]
    TokenExpired,

    /// Provider infrastructure failure.
    #[error("auth provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
    /// Wraps a provider infrastructure error.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}

/// External authentication capability.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Derives the stored credential hash for a secret at registration time.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] when the provider is unavailable.
    async fn hash_secret(&self, secret: &str) -> Result<CredentialHash, AuthError>;

    /// Validates a login/secret pair and resolves the user identity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the pair does not
    /// resolve to a registered identity.
    async fn validate_credential(&self, login: &str, secret: &str)
    -> Result<UserIdentity, AuthError>;

    /// Issues a token for a resolved identity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] when the provider is unavailable.
    async fn issue_token(&self, identity: &UserIdentity) -> Result<IssuedToken, AuthError>;

    /// Validates a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for unknown tokens and
    /// [`AuthError::TokenExpired`] for expired ones.
    async fn validate_token(&self, token: &str) -> Result<Claims, AuthError>;
}
