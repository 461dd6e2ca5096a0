//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, SpellerMode};

use state_builders::build_http_state;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use notes_api::Trace;
#[cfg(debug_assertions)]
use notes_api::doc::ApiDoc;
use notes_api::domain::SessionTokenCodec;
use notes_api::inbound::http::health::{HealthState, live, ready};
use notes_api::inbound::http::routes::configure;
use notes_api::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Seconds in-flight requests get to finish once shutdown starts.
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Cross-origin policy for browser clients: any origin, the four verbs the
/// API answers to, and only the `Authorization` and `Content-Type` headers.
fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .wrap(cors())
        .wrap(Trace)
        .configure(|cfg| configure(cfg, http_state))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the prepared configuration.
///
/// Readiness flips to ready once the listener is bound. Signal handling is
/// left to the caller, which must mark the state unhealthy and stop the
/// server through its handle.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        tokens,
        db_pool,
        storage_timeout,
        speller,
    } = config;

    let codec = SessionTokenCodec::new(tokens.key, Arc::new(DefaultClock));
    let http_state = web::Data::new(build_http_state(
        &db_pool,
        storage_timeout,
        speller,
        codec,
        tokens.cookie_secure,
    ));

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
        .disable_signals()
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
