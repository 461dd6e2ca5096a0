//! Route table for the HTTP adapter.
//!
//! ```text
//! POST   /register
//! POST   /login
//! GET    /notes           (token cookie)
//! POST   /notes           (token cookie)
//! DELETE /notes?id=<id>   (token cookie)
//! ```

use actix_web::web;

use crate::inbound::http::extractor_config::{form_config, query_config};
use crate::inbound::http::notes::{create_note, delete_note, list_notes};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{login, register};
use crate::middleware::AuthGate;

/// Register the account and notes endpoints.
///
/// The `/notes` scope is wrapped in [`AuthGate`] using the codec carried by
/// `state`; account endpoints stay open.
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<HttpState>) {
    let gate = AuthGate::new(state.tokens.clone());
    cfg.app_data(state)
        .app_data(form_config())
        .app_data(query_config())
        .service(register)
        .service(login)
        .service(
            web::scope("/notes")
                .wrap(gate)
                .service(list_notes)
                .service(create_note)
                .service(delete_note),
        );
}
