//! User aggregate and credential scalar types.

use super::{DisplayName, RoleId, UserDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized unique login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Login(String);

impl Login {
    /// Creates a validated login.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidLogin`] when the value is empty
    /// after trimming or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(UserDomainError::InvalidLogin(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the login as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Login {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque credential hash produced by the authentication provider.
///
/// The engine never inspects or compares this value; it only stores and
/// returns it to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wraps a provider-produced hash.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the hash as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Registered user aggregate.
///
/// Immutable after registration apart from credential rotation, which is
/// outside the scope of this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: DisplayName,
    login: Login,
    role: RoleId,
    credential: CredentialHash,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted display-name parts.
    pub name: DisplayName,
    /// Persisted login.
    pub login: Login,
    /// Persisted role identifier.
    pub role: RoleId,
    /// Persisted credential hash.
    pub credential: CredentialHash,
}

impl User {
    /// Creates a new user at registration time.
    #[must_use]
    pub fn register(name: DisplayName, login: Login, role: RoleId, credential: CredentialHash) -> Self {
        Self {
            id: UserId::new(),
            name,
            login,
            role,
            credential,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            login: data.login,
            role: data.role,
            credential: data.credential,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display-name parts.
    #[must_use]
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Returns the login.
    #[must_use]
    pub const fn login(&self) -> &Login {
        &self.login
    }

    /// Returns the role identifier.
    #[must_use]
    pub const fn role(&self) -> RoleId {
        self.role
    }

    /// Returns the stored credential hash.
    #[must_use]
    pub const fn credential(&self) -> &CredentialHash {
        &self.credential
    }
}
