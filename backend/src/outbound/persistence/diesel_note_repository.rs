//! PostgreSQL-backed `NoteRepository` implementation using Diesel ORM.
//!
//! Every statement filters on `user_id`, including the delete, which is a
//! single `DELETE ... WHERE id = $1 AND user_id = $2` so ownership is checked
//! atomically with the removal.

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NotePersistenceError, NoteRepository};
use crate::domain::{Note, NoteId, NoteText, UserId};

use super::deadline::{DEFAULT_STORAGE_TIMEOUT, with_deadline};
use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewNoteRow, NoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::notes;

/// Diesel-backed implementation of the `NoteRepository` port.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
    deadline: Duration,
}

impl DieselNoteRepository {
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

fn map_pool_error(error: PoolError) -> NotePersistenceError {
    map_basic_pool_error(error, NotePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> NotePersistenceError {
    map_basic_diesel_error(
        error,
        NotePersistenceError::query,
        NotePersistenceError::connection,
    )
}

fn row_to_note(row: NoteRow) -> Note {
    Note::new(
        NoteId::new(row.id),
        UserId::new(row.user_id),
        NoteText::new(row.text),
    )
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Note>, NotePersistenceError> {
        with_deadline(self.deadline, NotePersistenceError::timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;

            let rows: Vec<NoteRow> = notes::table
                .filter(notes::user_id.eq(owner.as_i32()))
                .order(notes::id.asc())
                .select(NoteRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(row_to_note).collect())
        })
        .await
    }

    async fn create(&self, owner: UserId, text: &NoteText) -> Result<Note, NotePersistenceError> {
        with_deadline(self.deadline, NotePersistenceError::timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let new_row = NewNoteRow {
                user_id: owner.as_i32(),
                text: text.as_str(),
            };

            diesel::insert_into(notes::table)
                .values(&new_row)
                .returning(NoteRow::as_returning())
                .get_result(&mut conn)
                .await
                .map(row_to_note)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn delete_owned(&self, owner: UserId, id: NoteId) -> Result<u64, NotePersistenceError> {
        with_deadline(self.deadline, NotePersistenceError::timeout, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;

            let removed = diesel::delete(
                notes::table
                    .filter(notes::id.eq(id.as_i32()))
                    .filter(notes::user_id.eq(owner.as_i32())),
            )
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

            Ok(u64::try_from(removed).unwrap_or(u64::MAX))
        })
        .await
    }
}
