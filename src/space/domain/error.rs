//! Error types for space domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain space values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpaceDomainError {
    /// The space name is empty after trimming.
    #[error("space name must not be empty")]
    EmptySpaceName,
}

/// Error returned while parsing membership roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown space role: {0}")]
pub struct ParseSpaceRoleError(pub String);
