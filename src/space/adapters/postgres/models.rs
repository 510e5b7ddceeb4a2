//! Diesel row models for space and membership persistence.

use super::schema::{space_memberships, spaces};
use crate::space::domain::{
    Membership, PersistedSpaceData, Space, SpaceId, SpaceName, SpaceRole,
};
use crate::space::ports::{SpaceStoreError, SpaceStoreResult};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for space records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = spaces)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SpaceRow {
    /// Space identifier.
    pub id: uuid::Uuid,
    /// Space name.
    pub name: String,
    /// Creator user identifier.
    pub creator_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for space records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = spaces)]
pub struct NewSpaceRow {
    /// Space identifier.
    pub id: uuid::Uuid,
    /// Space name.
    pub name: String,
    /// Creator user identifier.
    pub creator_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for membership records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = space_memberships)]
pub struct MembershipRow {
    /// Space the membership belongs to.
    pub space_id: uuid::Uuid,
    /// Member user identifier.
    pub user_id: uuid::Uuid,
    /// Role held within the space.
    pub role: String,
}

/// Converts a domain space to an insert row.
pub fn to_new_space_row(space: &Space) -> NewSpaceRow {
    NewSpaceRow {
        id: space.id().into_inner(),
        name: space.name().as_str().to_owned(),
        creator_id: space.creator().into_inner(),
        created_at: space.created_at(),
    }
}

/// Converts a domain membership to an insert row.
pub fn to_membership_row(membership: &Membership) -> MembershipRow {
    MembershipRow {
        space_id: membership.space.into_inner(),
        user_id: membership.user.into_inner(),
        role: membership.role.as_str().to_owned(),
    }
}

/// Converts a stored row back to the domain aggregate.
pub fn row_to_space(row: SpaceRow) -> SpaceStoreResult<Space> {
    let name = SpaceName::new(row.name).map_err(SpaceStoreError::persistence)?;
    Ok(Space::from_persisted(PersistedSpaceData {
        id: SpaceId::from_uuid(row.id),
        name,
        creator: UserId::from_uuid(row.creator_id),
        created_at: row.created_at,
    }))
}

/// Parses a stored role string.
pub fn parse_role(raw: &str) -> SpaceStoreResult<SpaceRole> {
    SpaceRole::try_from(raw).map_err(SpaceStoreError::persistence)
}
