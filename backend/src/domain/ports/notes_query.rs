//! Driving port for reading the caller's notes.

use async_trait::async_trait;

use crate::domain::{Error, Note, Username};

/// Domain use-case port for listing notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// Return every note owned by `username`, oldest first.
    async fn list_notes(&self, username: &Username) -> Result<Vec<Note>, Error>;
}
