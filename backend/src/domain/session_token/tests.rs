//! Tests for session token issue and verification.

use std::sync::Arc;

use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::test_support::MutableClock;

const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

fn epoch() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0) {
        chrono::LocalResult::Single(instant) => instant,
        _ => panic!("fixture instant is unambiguous"),
    }
}

struct Harness {
    clock: Arc<MutableClock>,
    codec: SessionTokenCodec,
}

#[fixture]
fn harness() -> Harness {
    let clock = Arc::new(MutableClock::new(epoch()));
    let key = SigningKey::new(KEY.to_vec()).expect("fixture key is non-empty");
    let codec = SessionTokenCodec::new(key, clock.clone());
    Harness { clock, codec }
}

#[fixture]
fn alice() -> Username {
    Username::new("alice").expect("valid username")
}

/// Sign arbitrary header and claims JSON with `key`, bypassing the codec.
fn forge(key: &[u8], header: &Value, claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(header.to_string());
    let claims = URL_SAFE_NO_PAD.encode(claims.to_string());
    let input = format!("{header}.{claims}");
    let mut mac = HmacSha256::new_from_slice(key).expect("hmac accepts any key length");
    mac.update(input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    format!("{input}.{signature}")
}

fn valid_claims(username: &str) -> Value {
    let iat = epoch().timestamp();
    json!({"username": username, "iat": iat, "exp": iat + TOKEN_VALIDITY_SECONDS})
}

#[rstest]
fn issued_tokens_verify_to_the_same_username(harness: Harness, alice: Username) {
    let issued = harness.codec.issue(&alice).expect("issue succeeds");
    assert_eq!(harness.codec.verify(issued.token()), Ok(alice));
}

#[rstest]
fn expiry_is_one_day_after_issue(harness: Harness, alice: Username) {
    let issued = harness.codec.issue(&alice).expect("issue succeeds");
    assert_eq!(issued.expires_at(), epoch() + TimeDelta::hours(24));
}

#[rstest]
fn tokens_have_three_segments_with_hs256_header(harness: Harness, alice: Username) {
    let issued = harness.codec.issue(&alice).expect("issue succeeds");
    let segments: Vec<&str> = issued.token().split('.').collect();
    assert_eq!(segments.len(), 3);

    let header_bytes = URL_SAFE_NO_PAD
        .decode(segments.first().expect("header segment"))
        .expect("header is base64url");
    let header: Value = serde_json::from_slice(&header_bytes).expect("header is JSON");
    assert_eq!(header, json!({"alg": "HS256", "typ": "JWT"}));
}

#[rstest]
fn token_stays_valid_just_before_expiry(harness: Harness, alice: Username) {
    let issued = harness.codec.issue(&alice).expect("issue succeeds");
    harness.clock.advance_seconds(TOKEN_VALIDITY_SECONDS - 1);
    assert!(harness.codec.verify(issued.token()).is_ok());
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3_600)]
fn token_is_rejected_at_and_after_expiry(
    harness: Harness,
    alice: Username,
    #[case] extra_seconds: i64,
) {
    let issued = harness.codec.issue(&alice).expect("issue succeeds");
    harness
        .clock
        .advance_seconds(TOKEN_VALIDITY_SECONDS + extra_seconds);
    assert_eq!(harness.codec.verify(issued.token()), Err(TokenError::Rejected));
}

#[rstest]
fn token_signed_with_another_key_is_rejected(harness: Harness) {
    let forged = forge(
        b"a completely different signing key",
        &json!({"alg": "HS256", "typ": "JWT"}),
        &valid_claims("alice"),
    );
    assert_eq!(harness.codec.verify(&forged), Err(TokenError::Rejected));
}

#[rstest]
fn tampered_claims_are_rejected(harness: Harness, alice: Username) {
    let issued = harness.codec.issue(&alice).expect("issue succeeds");
    let mut segments = issued.token().split('.');
    let header = segments.next().expect("header");
    let _claims = segments.next().expect("claims");
    let signature = segments.next().expect("signature");
    let swapped = URL_SAFE_NO_PAD.encode(valid_claims("mallory").to_string());

    let tampered = format!("{header}.{swapped}.{signature}");
    assert_eq!(harness.codec.verify(&tampered), Err(TokenError::Rejected));
}

#[rstest]
#[case(json!({"alg": "none", "typ": "JWT"}))]
#[case(json!({"alg": "HS512", "typ": "JWT"}))]
fn algorithms_other_than_hs256_are_rejected(harness: Harness, #[case] header: Value) {
    let forged = forge(KEY, &header, &valid_claims("alice"));
    assert_eq!(harness.codec.verify(&forged), Err(TokenError::Rejected));
}

#[rstest]
#[case(json!({"username": "alice"}))]
#[case(json!({"username": "   ", "iat": 0, "exp": i64::MAX}))]
#[case(json!({"user": "alice", "iat": 0, "exp": i64::MAX}))]
fn validly_signed_but_invalid_claims_are_rejected(harness: Harness, #[case] claims: Value) {
    let forged = forge(KEY, &json!({"alg": "HS256"}), &claims);
    assert_eq!(harness.codec.verify(&forged), Err(TokenError::Rejected));
}

#[rstest]
fn correctly_signed_foreign_token_is_accepted(harness: Harness) {
    let forged = forge(KEY, &json!({"alg": "HS256"}), &valid_claims("bob"));
    let username = harness.codec.verify(&forged).expect("token verifies");
    assert_eq!(username.as_ref(), "bob");
}

#[rstest]
#[case("")]
#[case("not-a-token")]
#[case("a.b")]
#[case("a.b.c.d")]
#[case("###.###.###")]
#[case("eyJhbGciOiJIUzI1NiJ9.e30.")]
fn malformed_tokens_are_rejected(harness: Harness, #[case] token: &str) {
    assert_eq!(harness.codec.verify(token), Err(TokenError::Rejected));
}

#[test]
fn empty_signing_keys_are_refused() {
    assert!(matches!(SigningKey::new(Vec::new()), Err(SigningKeyError::Empty)));
}

#[test]
fn signing_key_debug_hides_material() {
    let key = SigningKey::new(KEY.to_vec()).expect("non-empty key");
    let rendered = format!("{key:?}");
    assert_eq!(rendered, "SigningKey(<32 bytes>)");
}
