//! Shared mapping from persistence port errors to domain errors.
//!
//! Messages name the failing store but never carry driver detail; the HTTP
//! adapter redacts server faults anyway, and the detail is logged here.

use tracing::{debug, error};

use super::Error;
use super::ports::{NotePersistenceError, UserPersistenceError};

/// Map user repository failures onto domain error codes.
pub fn map_user_persistence_error(err: UserPersistenceError) -> Error {
    error!(error = %err, kind = err.kind(), "user repository failure");
    match err {
        UserPersistenceError::Timeout => Error::timeout("user repository timed out"),
        UserPersistenceError::Connection { .. }
        | UserPersistenceError::Query { .. }
        | UserPersistenceError::DuplicateUsername { .. } => Error::internal("user repository error"),
    }
}

/// Map note repository failures onto domain error codes.
pub fn map_note_persistence_error(err: NotePersistenceError) -> Error {
    match err {
        NotePersistenceError::Connection { message } => {
            error!(%message, "note repository connection failure");
            Error::internal("note repository unavailable")
        }
        NotePersistenceError::Timeout => {
            debug!("note repository deadline elapsed");
            Error::timeout("note repository timed out")
        }
        NotePersistenceError::Query { message } => {
            error!(%message, "note repository query failure");
            Error::internal("note repository error")
        }
    }
}
