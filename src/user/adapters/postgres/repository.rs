//! `PostgreSQL` repository implementation for user storage.

use super::{
    models::{UserRow, row_to_user, to_new_row},
    schema::users,
};
use crate::user::{
    domain::{Login, User, UserId},
    ports::{UserStore, UserStoreError, UserStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by user adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user store.
#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: UserPgPool,
}

impl PostgresUserStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserStoreError::persistence)?
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn insert(&self, user: &User) -> UserStoreResult<()> {
        let login = user.login().clone();
        let new_row = to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserStoreError::DuplicateLogin(login.clone())
                    }
                    _ => UserStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserStoreResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserStoreError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_login(&self, login: &Login) -> UserStoreResult<Option<User>> {
        let raw_login = login.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::login.eq(raw_login))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserStoreError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_all(&self) -> UserStoreResult<Vec<User>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserStoreError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }
}
