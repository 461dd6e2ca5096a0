//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities and the use-cases that operate on
//! them, independent of HTTP and PostgreSQL. Inbound adapters call the
//! driving ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Username, PasswordHash: account identity.
//! - Note, NoteId, NoteText: owned notes.
//! - SessionTokenCodec: signed, time-limited session tokens.
//! - AccountService / NotesService: the driving-port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod note;
pub mod notes_service;
pub mod persistence_error_mapping;
pub mod ports;
pub mod session_token;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::note::{Note, NoteId, NoteText};
pub use self::notes_service::NotesService;
pub use self::session_token::{
    IssuedToken, SessionTokenCodec, SigningKey, SigningKeyError, TOKEN_VALIDITY_SECONDS,
    TokenError,
};
pub use self::trace_id::TraceId;
pub use self::user::{
    PasswordHash, USERNAME_MAX, User, UserId, Username, UsernameValidationError,
};
