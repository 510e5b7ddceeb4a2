//! Domain model for spaces and memberships.

mod error;
mod ids;
mod membership;
mod space;

pub use error::{ParseSpaceRoleError, SpaceDomainError};
pub use ids::SpaceId;
pub use membership::{Membership, SpaceRole};
pub use space::{PersistedSpaceData, Space, SpaceName};
