//! `PostgreSQL` repository implementation for the membership registry.

use super::{
    models::{
        SpaceRow, parse_role, row_to_space, to_membership_row, to_new_space_row,
    },
    schema::{space_memberships, spaces},
};
use crate::space::{
    domain::{Membership, Space, SpaceId, SpaceRole},
    ports::{SpaceStore, SpaceStoreError, SpaceStoreResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by space adapters.
pub type SpacePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed space store.
#[derive(Debug, Clone)]
pub struct PostgresSpaceStore {
    pool: SpacePgPool,
}

impl From<DieselError> for SpaceStoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl PostgresSpaceStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SpacePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SpaceStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SpaceStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SpaceStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SpaceStoreError::persistence)?
    }
}

#[async_trait]
impl SpaceStore for PostgresSpaceStore {
    async fn create_space(
        &self,
        space: &Space,
        creator_membership: &Membership,
    ) -> SpaceStoreResult<()> {
        let space_id = space.id();
        let space_row = to_new_space_row(space);
        let membership_row = to_membership_row(creator_membership);

        self.run_blocking(move |connection| {
            connection.transaction::<(), SpaceStoreError, _>(|connection| {
                diesel::insert_into(spaces::table)
                    .values(&space_row)
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            SpaceStoreError::DuplicateSpace(space_id)
                        }
                        _ => SpaceStoreError::persistence(err),
                    })?;

                diesel::insert_into(space_memberships::table)
                    .values(&membership_row)
                    .execute(connection)
                    .map_err(SpaceStoreError::persistence)?;

                Ok(())
            })
        })
        .await
    }

    async fn find_space(&self, id: SpaceId) -> SpaceStoreResult<Option<Space>> {
        self.run_blocking(move |connection| {
            let row = spaces::table
                .filter(spaces::id.eq(id.into_inner()))
                .select(SpaceRow::as_select())
                .first::<SpaceRow>(connection)
                .optional()
                .map_err(SpaceStoreError::persistence)?;
            row.map(row_to_space).transpose()
        })
        .await
    }

    async fn upsert_member(&self, membership: &Membership) -> SpaceStoreResult<()> {
        let row = to_membership_row(membership);

        self.run_blocking(move |connection| {
            diesel::insert_into(space_memberships::table)
                .values(&row)
                .on_conflict((space_memberships::space_id, space_memberships::user_id))
                .do_update()
                .set(space_memberships::role.eq(&row.role))
                .execute(connection)
                .map_err(SpaceStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_role(
        &self,
        space: SpaceId,
        user: UserId,
    ) -> SpaceStoreResult<Option<SpaceRole>> {
        self.run_blocking(move |connection| {
            let raw = space_memberships::table
                .filter(space_memberships::space_id.eq(space.into_inner()))
                .filter(space_memberships::user_id.eq(user.into_inner()))
                .select(space_memberships::role)
                .first::<String>(connection)
                .optional()
                .map_err(SpaceStoreError::persistence)?;
            raw.as_deref().map(parse_role).transpose()
        })
        .await
    }

    async fn spaces_for_user(&self, user: UserId) -> SpaceStoreResult<Vec<Space>> {
        self.run_blocking(move |connection| {
            let member_spaces = space_memberships::table
                .filter(space_memberships::user_id.eq(user.into_inner()))
                .select(space_memberships::space_id);
            let rows = spaces::table
                .filter(spaces::id.eq_any(member_spaces))
                .select(SpaceRow::as_select())
                .load::<SpaceRow>(connection)
                .map_err(SpaceStoreError::persistence)?;
            rows.into_iter().map(row_to_space).collect()
        })
        .await
    }

    async fn delete_space(&self, id: SpaceId) -> SpaceStoreResult<bool> {
        self.run_blocking(move |connection| {
            connection.transaction::<bool, SpaceStoreError, _>(|connection| {
                diesel::delete(
                    space_memberships::table
                        .filter(space_memberships::space_id.eq(id.into_inner())),
                )
                .execute(connection)
                .map_err(SpaceStoreError::persistence)?;

                let removed = diesel::delete(spaces::table.filter(spaces::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(SpaceStoreError::persistence)?;

                Ok(removed > 0)
            })
        })
        .await
    }
}
