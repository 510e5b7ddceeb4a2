//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing domain user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The given name is empty after trimming.
    #[error("given name must not be empty")]
    EmptyGivenName,

    /// The family name is empty after trimming.
    #[error("family name must not be empty")]
    EmptyFamilyName,

    /// The login is empty after trimming or contains whitespace.
    #[error("invalid login '{0}'")]
    InvalidLogin(String),
}
