//! Builders wiring the Diesel, Argon2 and speller adapters into HTTP state.

use std::sync::Arc;
use std::time::Duration;

use notes_api::domain::ports::{
    NotesCommand, NotesQuery, PassthroughSpellingCorrector, SpellingCorrector,
};
use notes_api::domain::{AccountService, NotesService, SessionTokenCodec};
use notes_api::inbound::http::state::{HttpState, HttpStatePorts};
use notes_api::outbound::persistence::{DbPool, DieselNoteRepository, DieselUserRepository};
use notes_api::outbound::security::Argon2PasswordHasher;

use super::SpellerMode;

type NotesPorts = (Arc<dyn NotesQuery>, Arc<dyn NotesCommand>);

/// Notes service over the shared repositories and the chosen corrector.
fn notes_ports<S>(
    users: &Arc<DieselUserRepository>,
    notes: &Arc<DieselNoteRepository>,
    corrector: S,
) -> NotesPorts
where
    S: SpellingCorrector + 'static,
{
    let service = Arc::new(NotesService::new(
        users.clone(),
        notes.clone(),
        Arc::new(corrector),
    ));
    (service.clone(), service)
}

/// Build the shared HTTP state.
///
/// Both repositories share one pool and one storage deadline; the account
/// service and the auth gate share `tokens`.
pub fn build_http_state(
    pool: &DbPool,
    storage_timeout: Duration,
    speller: SpellerMode,
    tokens: SessionTokenCodec,
    cookie_secure: bool,
) -> HttpState {
    let users =
        Arc::new(DieselUserRepository::new(pool.clone()).with_deadline(storage_timeout));
    let notes =
        Arc::new(DieselNoteRepository::new(pool.clone()).with_deadline(storage_timeout));

    let (notes_query, notes_command) = match speller {
        SpellerMode::Remote(corrector) => notes_ports(&users, &notes, corrector),
        SpellerMode::Disabled => notes_ports(&users, &notes, PassthroughSpellingCorrector),
    };
    let login = Arc::new(AccountService::new(
        users,
        Arc::new(Argon2PasswordHasher::new()),
        tokens.clone(),
    ));

    HttpState::new(
        HttpStatePorts {
            login,
            notes_query,
            notes_command,
        },
        tokens,
        cookie_secure,
    )
}
