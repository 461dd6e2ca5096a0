//! Account API handlers.
//!
//! ```text
//! POST /register  username=alice&password=secret1
//! POST /login     username=alice&password=secret1
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::token_cookie::build_token_cookie;

/// Form body shared by `POST /register` and `POST /login`.
///
/// Missing fields decode as empty strings so they fail validation with a
/// field-level error rather than a generic form error.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<&CredentialsForm> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &CredentialsForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_credentials_error(err: LoginValidationError) -> Error {
    let code = match err {
        LoginValidationError::EmptyUsername => "empty_username",
        LoginValidationError::UsernameTooLong { .. } => "username_too_long",
        LoginValidationError::EmptyPassword => "empty_password",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": code }))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "User registered", body = String),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "User could not be created", body = Error)
    ),
    tags = ["users"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(&*form).map_err(map_credentials_error)?;
    state.login.register(&credentials).await?;
    Ok(HttpResponse::Ok().body("User registered successfully"))
}

/// Authenticate and receive the `token` cookie.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session token cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(&*form).map_err(map_credentials_error)?;
    let issued = state.login.login(&credentials).await?;
    Ok(HttpResponse::Ok()
        .cookie(build_token_cookie(&issued, state.cookie_secure))
        .finish())
}

#[cfg(test)]
mod tests;
