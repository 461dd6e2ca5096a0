//! Outbound adapters implementing the driven ports.
//!
//! - `persistence`: PostgreSQL via Diesel for users and notes.
//! - `security`: Argon2id password hashing.
//! - `speller`: HTTP client for the spelling correction service.

pub mod persistence;
pub mod security;
pub mod speller;
