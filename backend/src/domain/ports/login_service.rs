//! Driving port for registration and login use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! create accounts and exchange credentials for a session token without
//! knowing (or importing) the backing infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, LoginCredentials, UserId};

/// Domain use-case port for account creation and authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Create an account for the supplied credentials.
    async fn register(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;

    /// Validate credentials and issue a session token.
    ///
    /// Unknown users and wrong passwords fail identically.
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error>;
}
