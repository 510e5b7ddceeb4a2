//! Membership relation and space-scoped roles.

use super::{ParseSpaceRoleError, SpaceId};
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds within a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceRole {
    /// Full control, including inviting members.
    Admin,
    /// Regular participation.
    Member,
}

impl SpaceRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Returns whether this role satisfies the `required` role.
    ///
    /// Admin satisfies every requirement; member satisfies only member.
    #[must_use]
    pub const fn admits(self, required: Self) -> bool {
        match self {
            Self::Admin => true,
            Self::Member => matches!(required, Self::Member),
        }
    }
}

impl TryFrom<&str> for SpaceRole {
    type Error = ParseSpaceRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(ParseSpaceRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for SpaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ternary (space, user, role) relation with composite identity on
/// (space, user).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Space the membership belongs to.
    pub space: SpaceId,
    /// Member user.
    pub user: UserId,
    /// Role held within the space.
    pub role: SpaceRole,
}

impl Membership {
    /// Creates a membership record.
    #[must_use]
    pub const fn new(space: SpaceId, user: UserId, role: SpaceRole) -> Self {
        Self { space, user, role }
    }
}
