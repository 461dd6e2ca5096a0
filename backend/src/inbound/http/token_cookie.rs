//! The `token` cookie carrying the session token.

use actix_web::cookie::time::OffsetDateTime;
use actix_web::cookie::{Cookie, SameSite};

use crate::domain::IssuedToken;

/// Name of the cookie the auth gate reads.
pub const TOKEN_COOKIE: &str = "token";

/// Build the cookie set by a successful login.
///
/// The cookie is `HttpOnly`, scoped to `/`, and expires with the token.
pub fn build_token_cookie(issued: &IssuedToken, secure: bool) -> Cookie<'static> {
    let expires = OffsetDateTime::from_unix_timestamp(issued.expires_at().timestamp())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH);
    Cookie::build(TOKEN_COOKIE, issued.token().to_owned())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .expires(expires)
        .finish()
}
