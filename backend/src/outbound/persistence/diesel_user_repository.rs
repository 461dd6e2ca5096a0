//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Username uniqueness is delegated to the `users_username_key` constraint:
//! the insert either succeeds or reports a unique violation, so concurrent
//! registrations for one name cannot both win.

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, User, UserId, Username};

use super::deadline::{DEFAULT_STORAGE_TIMEOUT, with_deadline};
use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    deadline: Duration,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self {
            pool,
            deadline: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Bound every operation (checkout included) by `deadline`.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username).map_err(|err| {
        warn!(user_id = row.id, error = %err, "stored username fails validation");
        UserPersistenceError::query("stored username is invalid")
    })?;
    Ok(User::new(
        UserId::new(row.id),
        username,
        PasswordHash::new(row.password),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<UserId, UserPersistenceError> {
        with_deadline(self.deadline, UserPersistenceError::timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let new_row = NewUserRow {
                username: username.as_ref(),
                password: password_hash.as_str(),
            };

            diesel::insert_into(users::table)
                .values(&new_row)
                .returning(users::id)
                .get_result::<i32>(&mut conn)
                .await
                .map(UserId::new)
                .map_err(|err| {
                    if is_unique_violation(&err) {
                        UserPersistenceError::duplicate_username(username.to_string())
                    } else {
                        map_diesel_error(err)
                    }
                })
        })
        .await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        with_deadline(self.deadline, UserPersistenceError::timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;

            let row = users::table
                .filter(users::username.eq(username.as_ref()))
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;

            row.map(row_to_user).transpose()
        })
        .await
    }
}
