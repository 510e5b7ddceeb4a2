//! Space aggregate and validated name scalar.

use super::{SpaceDomainError, SpaceId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated non-empty space name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceName(String);

impl SpaceName {
    /// Creates a validated space name.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceDomainError::EmptySpaceName`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, SpaceDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(SpaceDomainError::EmptySpaceName);
        }
        Ok(Self(normalized))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SpaceName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SpaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Space aggregate: a named tenant boundary with exactly one creator.
///
/// Never mutated after creation besides membership changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    id: SpaceId,
    name: SpaceName,
    creator: UserId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSpaceData {
    /// Persisted space identifier.
    pub id: SpaceId,
    /// Persisted space name.
    pub name: SpaceName,
    /// Persisted creator.
    pub creator: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Space {
    /// Creates a new space.
    #[must_use]
    pub fn new(name: SpaceName, creator: UserId, clock: &impl Clock) -> Self {
        Self {
            id: SpaceId::new(),
            name,
            creator,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a space from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSpaceData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            creator: data.creator,
            created_at: data.created_at,
        }
    }

    /// Returns the space identifier.
    #[must_use]
    pub const fn id(&self) -> SpaceId {
        self.id
    }

    /// Returns the space name.
    #[must_use]
    pub const fn name(&self) -> &SpaceName {
        &self.name
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator(&self) -> UserId {
        self.creator
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
