//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::SessionTokenCodec;
use crate::domain::ports::{LoginService, NotesCommand, NotesQuery};

/// Parameter object bundling the driving ports used by HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub notes_query: Arc<dyn NotesQuery>,
    pub notes_command: Arc<dyn NotesCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub notes_query: Arc<dyn NotesQuery>,
    pub notes_command: Arc<dyn NotesCommand>,
    /// Codec the auth gate verifies `token` cookies with.
    pub tokens: SessionTokenCodec,
    /// Whether the `token` cookie is marked `Secure`.
    pub cookie_secure: bool,
}

impl HttpState {
    /// Construct state from the ports bundle and token settings.
    pub fn new(ports: HttpStatePorts, tokens: SessionTokenCodec, cookie_secure: bool) -> Self {
        let HttpStatePorts {
            login,
            notes_query,
            notes_command,
        } = ports;
        Self {
            login,
            notes_query,
            notes_command,
            tokens,
            cookie_secure,
        }
    }
}
