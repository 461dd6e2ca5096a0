//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::domain::ports::{
    LoginService, MockLoginService, MockNotesCommand, MockNotesQuery, NotesCommand, NotesQuery,
};
use crate::domain::{SessionTokenCodec, SigningKey, Username};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::test_support::MutableClock;

/// Clock frozen at a fixed instant for handler tests.
pub fn test_clock() -> Arc<MutableClock> {
    let now = Utc
        .with_ymd_and_hms(2026, 1, 15, 8, 30, 0)
        .single()
        .expect("valid fixture time");
    Arc::new(MutableClock::new(now))
}

/// Codec signing with a fixed test key.
pub fn test_codec(clock: Arc<MutableClock>) -> SessionTokenCodec {
    SessionTokenCodec::new(
        SigningKey::new(b"http-test-signing-key".to_vec()).expect("non-empty key"),
        clock,
    )
}

/// Issue a token for `name` with `codec`.
pub fn token_for(codec: &SessionTokenCodec, name: &str) -> String {
    codec
        .issue(&Username::new(name).expect("valid username"))
        .expect("token issues")
        .token()
        .to_owned()
}

/// Assemble handler state from individual ports.
///
/// Ports not relevant to a test can be passed as fresh mocks with no
/// expectations; any unexpected call then fails the test.
pub fn http_state(
    login: impl LoginService + 'static,
    notes_query: impl NotesQuery + 'static,
    notes_command: impl NotesCommand + 'static,
    codec: SessionTokenCodec,
) -> HttpState {
    HttpState::new(
        HttpStatePorts {
            login: Arc::new(login),
            notes_query: Arc::new(notes_query),
            notes_command: Arc::new(notes_command),
        },
        codec,
        false,
    )
}

/// State for tests that only exercise the login port.
pub fn login_only_state(login: MockLoginService) -> HttpState {
    http_state(
        login,
        MockNotesQuery::new(),
        MockNotesCommand::new(),
        test_codec(test_clock()),
    )
}
