//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod note_repository;
mod notes_command;
mod notes_query;
mod password_hasher;
mod spelling_corrector;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{NotePersistenceError, NoteRepository};
#[cfg(test)]
pub use notes_command::MockNotesCommand;
pub use notes_command::NotesCommand;
#[cfg(test)]
pub use notes_query::MockNotesQuery;
pub use notes_query::NotesQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{HashingError, PasswordHasher};
#[cfg(test)]
pub use spelling_corrector::MockSpellingCorrector;
pub use spelling_corrector::{
    PassthroughSpellingCorrector, SpellingCorrectionError, SpellingCorrector,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
