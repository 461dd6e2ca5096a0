//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the account, notes and health endpoints together with
//! the error envelope and note schemas. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::notes::{CreateNoteForm, NoteResponse};
use crate::inbound::http::users::CredentialsForm;

/// Enrich the generated document with the token cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "TokenCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "token",
                "Signed session token issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Notes API",
        description = "Multi-user notes with token cookie authentication and spelling correction."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::create_note,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Error, ErrorCode, NoteResponse, CredentialsForm, CreateNoteForm)),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "notes", description = "Notes owned by the authenticated caller"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
