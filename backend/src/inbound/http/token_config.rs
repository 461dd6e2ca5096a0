//! Token signing configuration parsing and validation.
//!
//! The signing secret and cookie toggles come from the process environment,
//! read through [`mockable::Env`] so every branch can be tested without
//! touching real variables.

use std::path::PathBuf;

use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::{SigningKey, SigningKeyError};

pub(crate) const KEY_ENV: &str = "JWT_KEY";
pub(crate) const KEY_FILE_ENV: &str = "JWT_KEY_FILE";
pub(crate) const COOKIE_SECURE_ENV: &str = "TOKEN_COOKIE_SECURE";
/// Minimum secret length accepted by release builds.
pub const SIGNING_KEY_MIN_LEN: usize = 32;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate short secrets and default missing toggles.
    Debug,
    /// Release builds require explicit, strong settings.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notes_api::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Token settings derived from the environment.
#[derive(Debug)]
pub struct TokenSettings {
    /// Secret used to sign and verify session tokens.
    pub key: SigningKey,
    /// Whether the `token` cookie is marked `Secure`.
    pub cookie_secure: bool,
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// Neither `JWT_KEY` nor `JWT_KEY_FILE` yielded a non-empty secret.
    #[error("missing token signing secret: set {KEY_ENV} or {KEY_FILE_ENV}")]
    MissingSecret,
    /// Reading the key file failed.
    #[error("failed to read signing key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret is too short for release builds.
    #[error("signing secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl From<SigningKeyError> for TokenConfigError {
    fn from(_: SigningKeyError) -> Self {
        Self::MissingSecret
    }
}

/// Build token settings from environment variables and build mode.
///
/// `JWT_KEY` takes precedence over `JWT_KEY_FILE`. Surrounding whitespace is
/// stripped from either source.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use notes_api::inbound::http::token_config::{BuildMode, token_settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_KEY" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     "TOKEN_COOKIE_SECURE" => Some("1".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release).expect("valid settings");
/// assert!(settings.cookie_secure);
/// assert_eq!(settings.key.len(), 32);
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let secret = secret_from_env(env)?;
    if secret.is_empty() {
        return Err(TokenConfigError::MissingSecret);
    }
    if !mode.is_debug() && secret.len() < SIGNING_KEY_MIN_LEN {
        return Err(TokenConfigError::SecretTooShort {
            length: secret.len(),
            min_len: SIGNING_KEY_MIN_LEN,
        });
    }
    if secret.len() < SIGNING_KEY_MIN_LEN {
        warn!(
            length = secret.len(),
            min_len = SIGNING_KEY_MIN_LEN,
            "signing secret is shorter than recommended (dev only)"
        );
    }
    let key = SigningKey::new(secret.to_vec())?;
    let cookie_secure = cookie_secure_from_env(env, mode)?;
    Ok(TokenSettings { key, cookie_secure })
}

fn secret_from_env<E: Env>(env: &E) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    if let Some(inline) = env.string(KEY_ENV) {
        let inline = Zeroizing::new(inline);
        return Ok(Zeroizing::new(inline.trim().as_bytes().to_vec()));
    }
    let Some(path) = env.string(KEY_FILE_ENV) else {
        return Err(TokenConfigError::MissingSecret);
    };
    let path = PathBuf::from(path);
    let bytes = Zeroizing::new(
        std::fs::read(&path).map_err(|source| TokenConfigError::KeyRead { path, source })?,
    );
    Ok(Zeroizing::new(bytes.trim_ascii().to_vec()))
}

fn cookie_secure_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    match env.string(COOKIE_SECURE_ENV) {
        Some(value) => match parse_bool(&value) {
            Some(flag) => Ok(flag),
            None if mode.is_debug() => {
                warn!(value = %value, "invalid {COOKIE_SECURE_ENV}; defaulting to insecure");
                Ok(false)
            }
            None => Err(TokenConfigError::InvalidEnv {
                name: COOKIE_SECURE_ENV,
                value,
                expected: BOOL_EXPECTED,
            }),
        },
        None if mode.is_debug() => {
            warn!("{COOKIE_SECURE_ENV} not set; defaulting to insecure");
            Ok(false)
        }
        None => Err(TokenConfigError::MissingEnv {
            name: COOKIE_SECURE_ENV,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
