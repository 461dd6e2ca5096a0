//! Stateless session tokens.
//!
//! Tokens are JWT-compatible compact strings signed with HMAC-SHA256:
//! `base64url(header).base64url(claims).base64url(mac)`. The claims bind a
//! username to an issue and expiry instant; nothing is stored server-side, so
//! a token stays valid until it expires.
//!
//! The signing key and the clock are injected so verification never touches
//! process-global state and expiry can be exercised deterministically.

use std::fmt;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use super::user::Username;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of an issued token.
pub const TOKEN_VALIDITY_SECONDS: i64 = 24 * 60 * 60;

const ALGORITHM: &str = "HS256";
const TOKEN_TYPE: &str = "JWT";

/// Error raised when a signing key cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningKeyError {
    /// The key material was empty.
    #[error("signing key must not be empty")]
    Empty,
}

/// Secret used to sign and verify session tokens.
///
/// The bytes are wiped on drop and never printed.
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    /// Wrap raw key material.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SigningKeyError> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.is_empty() {
            return Err(SigningKeyError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; construction rejects empty keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn expose(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<{} bytes>)", self.0.len())
    }
}

/// Failure surfaced by [`SessionTokenCodec`].
///
/// Verification deliberately collapses every reason into
/// [`TokenError::Rejected`]; the specific cause is only logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token is malformed, forged, expired or otherwise unacceptable.
    #[error("session token rejected")]
    Rejected,
    /// A token could not be produced.
    #[error("session token could not be signed: {message}")]
    Signing {
        /// Underlying failure description.
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Structure,
    Signature,
    Algorithm,
    Claims,
    Expired,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Structure => "malformed token",
            Self::Signature => "signature mismatch",
            Self::Algorithm => "unsupported algorithm",
            Self::Claims => "invalid claims",
            Self::Expired => "token expired",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    username: String,
    iat: i64,
    exp: i64,
}

/// A freshly signed token together with its expiry instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Compact token string.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Instant after which the token no longer verifies.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Issues and verifies HS256 session tokens.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use notes_api::domain::{SessionTokenCodec, SigningKey, Username};
///
/// let key = SigningKey::new(b"an example signing key".to_vec()).expect("non-empty key");
/// let codec = SessionTokenCodec::new(key, Arc::new(DefaultClock));
/// let alice = Username::new("alice").expect("valid username");
///
/// let issued = codec.issue(&alice).expect("token issued");
/// assert_eq!(codec.verify(issued.token()), Ok(alice));
/// ```
#[derive(Clone)]
pub struct SessionTokenCodec {
    key: Arc<SigningKey>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl SessionTokenCodec {
    /// Build a codec around a key and a time source.
    pub fn new(key: SigningKey, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            key: Arc::new(key),
            clock,
        }
    }

    /// Sign a token for `username` valid for [`TOKEN_VALIDITY_SECONDS`].
    pub fn issue(&self, username: &Username) -> Result<IssuedToken, TokenError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at + TimeDelta::seconds(TOKEN_VALIDITY_SECONDS);

        let header = encode_segment(&Header {
            alg: ALGORITHM.to_owned(),
            typ: Some(TOKEN_TYPE.to_owned()),
        })?;
        let claims = encode_segment(&Claims {
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })?;

        let signing_input = format!("{header}.{claims}");
        let mut mac = self.mac().map_err(|message| TokenError::Signing { message })?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(IssuedToken {
            token: format!("{signing_input}.{signature}"),
            expires_at,
        })
    }

    /// Verify a token and return the username it was issued for.
    pub fn verify(&self, token: &str) -> Result<Username, TokenError> {
        self.check(token).map_err(|rejection| {
            debug!(reason = %rejection, "session token rejected");
            TokenError::Rejected
        })
    }

    fn check(&self, token: &str) -> Result<Username, Rejection> {
        let mut segments = token.split('.');
        let (Some(header), Some(claims), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(Rejection::Structure);
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| Rejection::Structure)?;
        let mut mac = self.mac().map_err(|_| Rejection::Signature)?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(claims.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| Rejection::Signature)?;

        let header: Header = decode_segment(header)?;
        if header.alg != ALGORITHM {
            return Err(Rejection::Algorithm);
        }

        let claims: Claims = decode_segment(claims)?;
        if self.clock.utc().timestamp() >= claims.exp {
            return Err(Rejection::Expired);
        }

        Username::new(&claims.username).map_err(|_| Rejection::Claims)
    }

    fn mac(&self) -> Result<HmacSha256, String> {
        HmacSha256::new_from_slice(self.key.expose()).map_err(|error| error.to_string())
    }
}

impl fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value).map_err(|error| TokenError::Signing {
        message: error.to_string(),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, Rejection> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| Rejection::Structure)?;
    serde_json::from_slice(&bytes).map_err(|_| Rejection::Claims)
}

#[cfg(test)]
mod tests;
