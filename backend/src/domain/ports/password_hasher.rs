//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a password hash.
    pub enum HashingError {
        /// The hashing primitive refused the input or parameters.
        Rejected { message: String } => "password hashing failed: {message}",
        /// The background hashing task did not complete.
        Task { message: String } => "password hashing task failed: {message}",
    }
}

/// Salted, one-way password hashing with constant-time verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a fresh random salt.
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, HashingError>;

    /// Whether `plaintext` matches `hash`.
    ///
    /// Fails closed: any error, including an unparseable stored hash, yields
    /// `false`.
    async fn verify(&self, plaintext: &str, hash: &PasswordHash) -> bool;
}
