//! Handler tests for registration and login.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::MockLoginService;
use crate::domain::{IssuedToken, UserId};
use crate::inbound::http::extractor_config::form_config;
use crate::inbound::http::test_utils::{login_only_state, test_clock, test_codec};
use crate::inbound::http::token_cookie::TOKEN_COOKIE;

fn test_app(
    login_port: MockLoginService,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(login_only_state(login_port)))
        .app_data(form_config())
        .service(register)
        .service(login)
}

fn issued_for(name: &str) -> IssuedToken {
    let codec = test_codec(test_clock());
    codec
        .issue(&crate::domain::Username::new(name).expect("valid username"))
        .expect("token issues")
}

#[actix_web::test]
async fn register_reports_success_as_plain_text() {
    let mut port = MockLoginService::new();
    port.expect_register()
        .withf(|creds| creds.username().as_ref() == "alice" && creds.password() == "secret1")
        .times(1)
        .returning(|_| Ok(UserId::new(1)));
    let app = actix_test::init_service(test_app(port)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_form([("username", "alice"), ("password", "secret1")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(actix_test::read_body(res).await, "User registered successfully");
}

#[rstest]
#[case("", "secret1", "username", "empty_username")]
#[case("   ", "secret1", "username", "empty_username")]
#[case("alice", "", "password", "empty_password")]
#[case("xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx", "secret1", "username", "username_too_long")]
#[actix_web::test]
async fn invalid_credentials_are_rejected_before_the_port(
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    for uri in ["/register", "/login"] {
        let app = actix_test::init_service(test_app(MockLoginService::new())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(uri)
                .set_form([("username", username), ("password", password)])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }
}

#[actix_web::test]
async fn missing_form_fields_are_validation_errors() {
    let app = actix_test::init_service(test_app(MockLoginService::new())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_form([("password", "secret1")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "username");
}

#[actix_web::test]
async fn login_sets_the_token_cookie() {
    let issued = issued_for("alice");
    let expected_token = issued.token().to_owned();
    let mut port = MockLoginService::new();
    port.expect_login()
        .times(1)
        .returning(move |_| Ok(issued.clone()));
    let app = actix_test::init_service(test_app(port)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice"), ("password", "secret1")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == TOKEN_COOKIE)
        .expect("token cookie set");
    assert_eq!(cookie.value(), expected_token);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
}

#[actix_web::test]
async fn login_failure_sets_no_cookie() {
    let mut port = MockLoginService::new();
    port.expect_login()
        .times(1)
        .returning(|_| Err(Error::unauthorized("Invalid credentials")));
    let app = actix_test::init_service(test_app(port)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice"), ("password", "wrong")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.response().cookies().next().is_none());
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[actix_web::test]
async fn registration_failure_is_a_redacted_500() {
    let mut port = MockLoginService::new();
    port.expect_register()
        .times(1)
        .returning(|_| Err(Error::internal("Error creating user")));
    let app = actix_test::init_service(test_app(port)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_form([("username", "alice"), ("password", "secret1")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
