//! Driving port for note mutations.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteId, NoteText, Username};

/// Domain use-case port for creating and deleting notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesCommand: Send + Sync {
    /// Spell-correct `text` and store it as a note owned by `username`.
    async fn create_note(&self, username: &Username, text: NoteText) -> Result<Note, Error>;

    /// Remove the note when `username` owns it.
    ///
    /// Succeeds whether or not a row matched, so callers cannot probe for
    /// other users' note ids.
    async fn delete_note(&self, username: &Username, id: NoteId) -> Result<(), Error>;
}
