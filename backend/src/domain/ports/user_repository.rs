//! Port abstraction for credential persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{PasswordHash, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the requested username.
        DuplicateUsername { username: String } => "username {username} is already registered",
        /// The storage deadline elapsed before the operation finished.
        Timeout => "user repository operation timed out",
    }
}

/// Port for storing and looking up registered users.
///
/// Username uniqueness is the repository's responsibility: two concurrent
/// `create` calls for the same name must leave exactly one row behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return its identifier.
    async fn create(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<UserId, UserPersistenceError>;

    /// Fetch a user by login name.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_the_username() {
        let err = UserPersistenceError::duplicate_username("alice");
        assert_eq!(err.to_string(), "username alice is already registered");
        assert_eq!(err.kind(), "DuplicateUsername");
    }
}
