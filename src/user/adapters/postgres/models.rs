//! Diesel row models for user persistence.

use super::schema::users;
use crate::user::domain::{
    CredentialHash, DisplayName, Login, PersistedUserData, RoleId, User, UserId,
};
use crate::user::ports::{UserStoreError, UserStoreResult};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Given name.
    pub given_name: String,
    /// Family name.
    pub family_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Unique login.
    pub login: String,
    /// Organisational role identifier.
    pub role_id: i32,
    /// Opaque credential hash.
    pub credential: String,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Given name.
    pub given_name: String,
    /// Family name.
    pub family_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Unique login.
    pub login: String,
    /// Organisational role identifier.
    pub role_id: i32,
    /// Opaque credential hash.
    pub credential: String,
}

/// Converts a domain user to an insert row.
pub fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        given_name: user.name().given().to_owned(),
        family_name: user.name().family().to_owned(),
        middle_name: user.name().middle().map(str::to_owned),
        login: user.login().as_str().to_owned(),
        role_id: user.role().value(),
        credential: user.credential().as_str().to_owned(),
    }
}

/// Converts a stored row back to the domain aggregate.
pub fn row_to_user(row: UserRow) -> UserStoreResult<User> {
    let mut name =
        DisplayName::new(row.given_name, row.family_name).map_err(UserStoreError::persistence)?;
    if let Some(middle) = row.middle_name {
        name = name.with_middle(middle);
    }
    let login = Login::new(row.login).map_err(UserStoreError::persistence)?;

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(row.id),
        name,
        login,
        role: RoleId::new(row.role_id),
        credential: CredentialHash::new(row.credential),
    }))
}
