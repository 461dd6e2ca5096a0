//! Token cookie verification for protected routes.
//!
//! The decision is the pure function [`evaluate`]; [`AuthGate`] only applies
//! it. A verified caller is stored in the request extensions as an
//! [`AuthenticatedUser`], which handlers take as an extractor. Rejected
//! requests never reach the wrapped service.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::cookie::Cookie;
use actix_web::http::header::COOKIE;
use actix_web::{FromRequest, HttpMessage, HttpRequest, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, info};

use crate::domain::{Error, SessionTokenCodec, Username};
use crate::inbound::http::token_cookie::TOKEN_COOKIE;

/// Identity established by [`AuthGate`] for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: Username,
}

impl AuthenticatedUser {
    /// Wrap a verified username.
    #[must_use]
    pub const fn new(username: Username) -> Self {
        Self { username }
    }

    /// Username bound to the verified token.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // Fails closed when a route was mounted without the gate.
        ready(
            req.extensions()
                .get::<Self>()
                .cloned()
                .ok_or_else(|| Error::unauthorized("Unauthorized")),
        )
    }
}

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// No `token` cookie was sent.
    MissingToken,
    /// A token was sent but did not verify.
    InvalidToken,
    /// The `Cookie` header could not be parsed.
    MalformedCarrier,
}

impl GateRejection {
    /// Client-facing error for this rejection.
    #[must_use]
    pub fn to_error(self) -> Error {
        match self {
            Self::MissingToken | Self::InvalidToken => Error::unauthorized("Unauthorized"),
            Self::MalformedCarrier => Error::invalid_request("Bad request"),
        }
    }
}

/// Result of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The token verified; the request may proceed as this user.
    Continue(AuthenticatedUser),
    /// The request must be rejected.
    Reject(GateRejection),
}

/// Decide whether a request carries a valid session token.
///
/// Only the `token` cookie is consulted. Tokens in other headers are ignored.
pub fn evaluate(req: &HttpRequest, codec: &SessionTokenCodec) -> GateOutcome {
    let token = match token_from_cookies(req) {
        Ok(Some(token)) => token,
        Ok(None) => return GateOutcome::Reject(GateRejection::MissingToken),
        Err(reason) => {
            debug!(reason, "cookie header could not be parsed");
            return GateOutcome::Reject(GateRejection::MalformedCarrier);
        }
    };

    match codec.verify(&token) {
        Ok(username) => GateOutcome::Continue(AuthenticatedUser::new(username)),
        Err(_) => {
            info!(path = req.path(), "session token rejected");
            GateOutcome::Reject(GateRejection::InvalidToken)
        }
    }
}

/// Strictly parse every `Cookie` header and return the `token` value.
///
/// Actix's own cookie jar drops pairs it cannot parse, which would turn a
/// broken carrier into a missing one. Here any unparsable pair, a non-UTF-8
/// header, or a `token` value with a bad percent escape is an error.
fn token_from_cookies(req: &HttpRequest) -> Result<Option<String>, &'static str> {
    let mut token = None;
    for header in req.headers().get_all(COOKIE) {
        let header = header.to_str().map_err(|_| "cookie header is not valid UTF-8")?;
        for pair in header.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
            let cookie =
                Cookie::parse_encoded(pair).map_err(|_| "cookie pair could not be parsed")?;
            if cookie.name() != TOKEN_COOKIE {
                continue;
            }
            if has_invalid_escape(pair) {
                return Err("token cookie carries an invalid percent escape");
            }
            if token.is_none() {
                token = Some(cookie.value().to_owned());
            }
        }
    }
    Ok(token)
}

/// Whether `raw` contains a `%` not followed by two hex digits.
fn has_invalid_escape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.iter().enumerate().any(|(index, byte)| {
        *byte == b'%'
            && !matches!(
                (bytes.get(index + 1), bytes.get(index + 2)),
                (Some(high), Some(low)) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit()
            )
    })
}

/// Middleware requiring a valid `token` cookie.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use notes_api::AuthGate;
/// # fn build(codec: notes_api::domain::SessionTokenCodec) {
/// let app = App::new().service(web::scope("/notes").wrap(AuthGate::new(codec)));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AuthGate {
    codec: SessionTokenCodec,
}

impl AuthGate {
    /// Build the gate around the process-wide token codec.
    #[must_use]
    pub const fn new(codec: SessionTokenCodec) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service,
            codec: self.codec.clone(),
        }))
    }
}

/// Service wrapper produced by [`AuthGate`].
pub struct AuthGateMiddleware<S> {
    service: S,
    codec: SessionTokenCodec,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match evaluate(req.request(), &self.codec) {
            GateOutcome::Continue(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            GateOutcome::Reject(rejection) => Box::pin(async move {
                let response = rejection.to_error().error_response();
                Ok(req.into_response(response).map_into_right_body())
            }),
        }
    }
}
