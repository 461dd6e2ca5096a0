//! Extractor error handlers.
//!
//! Actix answers malformed forms and query strings with plain-text errors by
//! default. These configs turn them into the JSON error envelope.

use actix_web::error::{QueryPayloadError, UrlencodedError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Form body limit; credentials and note text are small.
const FORM_LIMIT_BYTES: usize = 64 * 1024;

/// `FormConfig` rejecting malformed bodies with `400 invalid_request`.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(FORM_LIMIT_BYTES)
        .error_handler(|err: UrlencodedError, _req: &HttpRequest| {
            debug!(error = %err, "form body rejected");
            Error::invalid_request("Bad request")
                .with_details(json!({ "code": "invalid_form" }))
                .into()
        })
}

/// `QueryConfig` rejecting malformed query strings with `400 invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        debug!(error = %err, "query string rejected");
        Error::invalid_request("Bad request")
            .with_details(json!({ "code": "invalid_query" }))
            .into()
    })
}
