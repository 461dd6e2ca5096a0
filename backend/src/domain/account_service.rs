//! Account registration and login.
//!
//! Implements the [`LoginService`] driving port on top of the credential
//! store, the password hasher, and the session token codec.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::persistence_error_mapping::map_user_persistence_error;
use super::ports::{LoginService, PasswordHasher, UserPersistenceError, UserRepository};
use super::{Error, IssuedToken, LoginCredentials, PasswordHash, SessionTokenCodec, UserId};

const REGISTRATION_FAILED: &str = "Error creating user";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Well-formed Argon2id hash with the default parameters that matches no
/// password. Unknown usernames are verified against it so they cost the same
/// as a wrong password.
pub(crate) const UNKNOWN_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$9BZtHatoN3+JwnNRye5pvA$eezooCUa99Vi8uT5vP0zREByRRZ4KB+e/E73JIEEv+4";

/// Registration and login use-cases.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: SessionTokenCodec,
}

impl<U, H> AccountService<U, H> {
    /// Create a service over the given adapters.
    pub const fn new(users: Arc<U>, hasher: Arc<H>, tokens: SessionTokenCodec) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let username = credentials.username();
        let hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(|err| {
                error!(error = %err, %username, "password hashing failed during registration");
                Error::internal(REGISTRATION_FAILED)
            })?;

        match self.users.create(username, &hash).await {
            Ok(user_id) => {
                info!(%user_id, %username, "user registered");
                Ok(user_id)
            }
            Err(UserPersistenceError::DuplicateUsername { .. }) => {
                // Reported like any other failure so registration does not
                // reveal which usernames exist.
                info!(%username, "registration rejected: username taken");
                Err(Error::internal(REGISTRATION_FAILED))
            }
            Err(err) => Err(map_user_persistence_error(err)),
        }
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error> {
        let username = credentials.username();
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_persistence_error)?;

        let Some(user) = user else {
            let _ = self
                .hasher
                .verify(credentials.password(), &PasswordHash::new(UNKNOWN_USER_HASH))
                .await;
            info!(%username, "login rejected");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if !self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
        {
            info!(%username, "login rejected");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let issued = self.tokens.issue(user.username()).map_err(|err| {
            error!(error = %err, "session token issue failed");
            Error::internal("failed to issue session token")
        })?;
        info!(user_id = %user.id(), %username, "user logged in");
        Ok(issued)
    }
}
