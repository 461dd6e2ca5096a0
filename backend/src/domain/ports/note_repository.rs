//! Port abstraction for note persistence adapters and their errors.
//!
//! Every operation takes the owning [`UserId`]; adapters must scope reads and
//! deletes by it so one user can never observe or remove another user's notes.

use async_trait::async_trait;

use crate::domain::{Note, NoteId, NoteText, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by note repository adapters.
    pub enum NotePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "note repository query failed: {message}",
        /// The storage deadline elapsed before the operation finished.
        Timeout => "note repository operation timed out",
    }
}

/// Port for owner-scoped note storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List the owner's notes in insertion order.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Note>, NotePersistenceError>;

    /// Store a note for the owner.
    async fn create(&self, owner: UserId, text: &NoteText) -> Result<Note, NotePersistenceError>;

    /// Delete the note if, and only if, it belongs to `owner`.
    ///
    /// Returns the number of rows removed (zero or one).
    async fn delete_owned(&self, owner: UserId, id: NoteId) -> Result<u64, NotePersistenceError>;
}
