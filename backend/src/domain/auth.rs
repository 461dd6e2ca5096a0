//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Registration and login accept the same credential shape.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Username, UsernameValidationError};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username exceeded the storage limit.
    UsernameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Password was blank.
    EmptyPassword,
}

impl LoginValidationError {
    /// Name of the offending form field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<UsernameValidationError> for LoginValidationError {
    fn from(value: UsernameValidationError) -> Self {
        match value {
            UsernameValidationError::Empty => Self::EmptyUsername,
            UsernameValidationError::TooLong { max } => Self::UsernameTooLong { max },
        }
    }
}

/// Validated credentials used by the account service.
///
/// ## Invariants
/// - `username` satisfies the [`Username`] rules.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons. It is wiped from memory on drop.
///
/// # Examples
/// ```
/// use notes_api::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice", "secret1").unwrap();
/// assert_eq!(creds.username().as_ref(), "alice");
/// assert_eq!(creds.password(), "secret1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Validated username suitable for user lookups.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::USERNAME_MAX;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
        assert_eq!(err.field(), expected.field());
    }

    #[test]
    fn overlong_username_is_rejected() {
        let err = LoginCredentials::try_from_parts(&"a".repeat(USERNAME_MAX + 1), "pw")
            .expect_err("overlong username must fail");
        assert_eq!(err, LoginValidationError::UsernameTooLong { max: USERNAME_MAX });
        assert_eq!(err.field(), "username");
    }

    #[rstest]
    #[case("  admin  ", "secret")]
    #[case("alice", " correct horse battery staple ")]
    fn valid_credentials_trim_username_only(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username().as_ref(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = LoginCredentials::try_from_parts("alice", "hunter2").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("alice"));
    }
}
