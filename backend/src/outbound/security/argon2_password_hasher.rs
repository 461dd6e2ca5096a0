//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$digest`)
//! with a fresh random salt per call. Both operations are CPU-bound and run
//! on the blocking pool so they do not stall request handling.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::Argon2;
use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{HashingError, PasswordHasher};
use crate::domain::PasswordHash;

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create the hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn hash_blocking(plaintext: &str) -> Result<PasswordHash, HashingError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| PasswordHash::new(hash.to_string()))
        .map_err(|err| HashingError::rejected(err.to_string()))
}

fn verify_blocking(plaintext: &str, encoded: &str) -> bool {
    let parsed = match PhcHash::new(encoded) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(error = %err, "stored password hash is not a valid PHC string");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, HashingError> {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        tokio::task::spawn_blocking(move || hash_blocking(&plaintext))
            .await
            .map_err(|err| HashingError::task(err.to_string()))?
    }

    async fn verify(&self, plaintext: &str, hash: &PasswordHash) -> bool {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let encoded = hash.as_str().to_owned();
        match tokio::task::spawn_blocking(move || verify_blocking(&plaintext, &encoded)).await {
            Ok(matched) => matched,
            Err(err) => {
                warn!(error = %err, "password verification task failed");
                false
            }
        }
    }
}
