//! Owner-scoped note use-cases.
//!
//! Every operation first resolves the caller's username to a user id and then
//! passes that id to the note store, so ownership is decided by storage
//! queries rather than by anything the client supplies.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::persistence_error_mapping::{map_note_persistence_error, map_user_persistence_error};
use super::ports::{NoteRepository, NotesCommand, NotesQuery, SpellingCorrector, UserRepository};
use super::{Error, Note, NoteId, NoteText, UserId, Username};

/// Notes service implementing the notes driving ports.
#[derive(Clone)]
pub struct NotesService<U, N, S> {
    users: Arc<U>,
    notes: Arc<N>,
    corrector: Arc<S>,
}

impl<U, N, S> NotesService<U, N, S> {
    /// Create a service over the given adapters.
    pub const fn new(users: Arc<U>, notes: Arc<N>, corrector: Arc<S>) -> Self {
        Self {
            users,
            notes,
            corrector,
        }
    }
}

impl<U, N, S> NotesService<U, N, S>
where
    U: UserRepository,
{
    async fn resolve_owner(&self, username: &Username) -> Result<UserId, Error> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_persistence_error)?;
        match user {
            Some(user) => Ok(user.id()),
            None => {
                debug!(%username, "authenticated username has no account");
                Err(Error::not_found("User not found"))
            }
        }
    }
}

#[async_trait]
impl<U, N, S> NotesQuery for NotesService<U, N, S>
where
    U: UserRepository,
    N: NoteRepository,
    S: SpellingCorrector,
{
    async fn list_notes(&self, username: &Username) -> Result<Vec<Note>, Error> {
        let owner = self.resolve_owner(username).await?;
        self.notes
            .list_for_owner(owner)
            .await
            .map_err(map_note_persistence_error)
    }
}

#[async_trait]
impl<U, N, S> NotesCommand for NotesService<U, N, S>
where
    U: UserRepository,
    N: NoteRepository,
    S: SpellingCorrector,
{
    async fn create_note(&self, username: &Username, text: NoteText) -> Result<Note, Error> {
        // Correction runs before the owner lookup; a failing speller aborts
        // creation with nothing stored.
        let corrected = self.corrector.correct(&text).await.map_err(|err| {
            error!(error = %err, kind = err.kind(), "spelling correction failed");
            Error::upstream_failure("Error checking spelling")
        })?;

        let owner = self.resolve_owner(username).await?;
        let note = self
            .notes
            .create(owner, &corrected)
            .await
            .map_err(map_note_persistence_error)?;
        info!(note_id = %note.id(), owner = %owner, "note created");
        Ok(note)
    }

    async fn delete_note(&self, username: &Username, id: NoteId) -> Result<(), Error> {
        let owner = self.resolve_owner(username).await?;
        let removed = self
            .notes
            .delete_owned(owner, id)
            .await
            .map_err(map_note_persistence_error)?;
        info!(note_id = %id, owner = %owner, removed, "note delete processed");
        Ok(())
    }
}
