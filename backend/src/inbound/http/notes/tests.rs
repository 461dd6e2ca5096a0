//! Handler tests for the notes endpoints.

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::{MockLoginService, MockNotesCommand, MockNotesQuery};
use crate::domain::{Error, UserId};
use crate::inbound::http::routes::configure;
use crate::inbound::http::test_utils::{http_state, test_clock, test_codec, token_for};
use crate::inbound::http::token_cookie::TOKEN_COOKIE;

async fn call(
    query: MockNotesQuery,
    command: MockNotesCommand,
    request: actix_test::TestRequest,
    as_user: Option<&str>,
) -> actix_web::dev::ServiceResponse {
    let codec = test_codec(test_clock());
    let request = match as_user {
        Some(name) => request.cookie(Cookie::new(TOKEN_COOKIE, token_for(&codec, name))),
        None => request,
    };
    let state = web::Data::new(http_state(MockLoginService::new(), query, command, codec));
    let app = actix_test::init_service(App::new().configure(|cfg| configure(cfg, state))).await;
    actix_test::call_service(&app, request.to_request()).await
}

fn note(id: i32, text: &str) -> Note {
    Note::new(NoteId::new(id), UserId::new(1), NoteText::new(text))
}

#[actix_web::test]
async fn lists_notes_as_json() {
    let mut query = MockNotesQuery::new();
    query
        .expect_list_notes()
        .withf(|username| username.as_ref() == "alice")
        .times(1)
        .returning(|_| Ok(vec![note(1, "hello world"), note(4, "second")]));

    let res = call(
        query,
        MockNotesCommand::new(),
        actix_test::TestRequest::get().uri("/notes"),
        Some("alice"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        serde_json::json!([{"id": 1, "text": "hello world"}, {"id": 4, "text": "second"}])
    );
}

#[actix_web::test]
async fn empty_list_is_an_empty_array() {
    let mut query = MockNotesQuery::new();
    query.expect_list_notes().returning(|_| Ok(Vec::new()));
    let res = call(
        query,
        MockNotesCommand::new(),
        actix_test::TestRequest::get().uri("/notes"),
        Some("alice"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(actix_test::read_body(res).await, "[]");
}

#[actix_web::test]
async fn create_passes_raw_text_to_the_command() {
    let mut command = MockNotesCommand::new();
    command
        .expect_create_note()
        .withf(|username, text| username.as_ref() == "bob" && text.as_str() == "helo wrld")
        .times(1)
        .returning(|_, text| Ok(Note::new(NoteId::new(9), UserId::new(2), text)));

    let res = call(
        MockNotesQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/notes")
            .set_form([("text", "helo wrld")]),
        Some("bob"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(actix_test::read_body(res).await, "Note created successfully");
}

#[actix_web::test]
async fn delete_scopes_by_caller_and_reports_success() {
    let mut command = MockNotesCommand::new();
    command
        .expect_delete_note()
        .withf(|username, id| username.as_ref() == "alice" && *id == NoteId::new(3))
        .times(1)
        .returning(|_, _| Ok(()));

    let res = call(
        MockNotesQuery::new(),
        command,
        actix_test::TestRequest::delete().uri("/notes?id=3"),
        Some("alice"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(actix_test::read_body(res).await, "Note deleted successfully");
}

#[rstest]
#[case("/notes")]
#[case("/notes?id=")]
#[case("/notes?id=abc")]
#[case("/notes?id=99999999999")]
#[actix_web::test]
async fn delete_with_bad_id_is_a_bad_request(#[case] uri: &str) {
    let res = call(
        MockNotesQuery::new(),
        MockNotesCommand::new(),
        actix_test::TestRequest::delete().uri(uri),
        Some("alice"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/notes"))]
#[case(actix_test::TestRequest::post().uri("/notes").set_form([("text", "x")]))]
#[case(actix_test::TestRequest::delete().uri("/notes?id=1"))]
#[actix_web::test]
async fn every_notes_route_requires_a_token(#[case] request: actix_test::TestRequest) {
    let res = call(MockNotesQuery::new(), MockNotesCommand::new(), request, None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn missing_user_maps_to_not_found() {
    let mut query = MockNotesQuery::new();
    query
        .expect_list_notes()
        .returning(|_| Err(Error::not_found("User not found")));
    let res = call(
        query,
        MockNotesCommand::new(),
        actix_test::TestRequest::get().uri("/notes"),
        Some("ghost"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "User not found");
}

#[actix_web::test]
async fn correction_failure_is_a_500() {
    let mut command = MockNotesCommand::new();
    command
        .expect_create_note()
        .returning(|_, _| Err(Error::upstream_failure("Error checking spelling")));
    let res = call(
        MockNotesQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/notes")
            .set_form([("text", "helo")]),
        Some("alice"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
