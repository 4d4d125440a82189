mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn sent_code_verifies_the_account_once() {
    let app = TestApp::spawn().await;
    let session = app.signup("verify@hotel.test", "secret1").await;

    let sent = app
        .post("/send-otp", None, json!({ "email": "Verify@Hotel.Test" }))
        .await;
    assert_eq!(sent.status, StatusCode::OK);
    assert_eq!(sent.body["message"], "OTP sent to email");

    let code = app.mailer.last_code_for("verify@hotel.test").unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));

    let ok = app
        .post(
            "/verify-otp",
            None,
            json!({ "email": "verify@hotel.test", "otp": code }),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["account_verified"], true);

    let details = app.get("/userdetails", Some(&session)).await;
    assert_eq!(details.body["verified"], true);

    let again = app
        .post(
            "/verify-otp",
            None,
            json!({ "email": "verify@hotel.test", "otp": code }),
        )
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.body["message"], "OTP has already been used");
}

#[tokio::test]
async fn wrong_or_unknown_codes_are_rejected() {
    let app = TestApp::spawn().await;

    let missing = app.post("/verify-otp", None, json!({ "email": "x@hotel.test" })).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .post("/verify-otp", None, json!({ "email": "x@hotel.test", "otp": "ABC123" }))
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.body["message"], "OTP NOT FOUND");

    app.post("/send-otp", None, json!({ "email": "x@hotel.test" })).await;
    let code = app.mailer.last_code_for("x@hotel.test").unwrap();
    let wrong: String = code
        .chars()
        .map(|c| if c == 'z' { 'y' } else { 'z' })
        .collect();
    let resp = app
        .post("/verify-otp", None, json!({ "email": "x@hotel.test", "otp": wrong }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Invalid OTP");

    // a failed attempt does not burn the code
    let resp = app
        .post("/verify-otp", None, json!({ "email": "x@hotel.test", "otp": code }))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn a_new_code_replaces_the_previous_one() {
    let app = TestApp::spawn().await;

    app.post("/send-otp", None, json!({ "email": "twice@hotel.test" })).await;
    let first = app.mailer.last_code_for("twice@hotel.test").unwrap();
    app.post("/send-otp", None, json!({ "email": "twice@hotel.test" })).await;
    let second = app.mailer.last_code_for("twice@hotel.test").unwrap();
    assert_eq!(app.mailer.count(), 2);

    if first != second {
        let stale = app
            .post("/verify-otp", None, json!({ "email": "twice@hotel.test", "otp": first }))
            .await;
        assert_eq!(stale.status, StatusCode::BAD_REQUEST);
    }
    let fresh = app
        .post("/verify-otp", None, json!({ "email": "twice@hotel.test", "otp": second }))
        .await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn expired_code_is_rejected() {
    let app = TestApp::spawn_with(|cfg| cfg.otp_ttl_minutes = -1).await;

    app.post("/send-otp", None, json!({ "email": "late@hotel.test" })).await;
    let code = app.mailer.last_code_for("late@hotel.test").unwrap();
    let resp = app
        .post("/verify-otp", None, json!({ "email": "late@hotel.test", "otp": code }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "OTP has expired");

    // expiry marks the code used
    let resp = app
        .post("/verify-otp", None, json!({ "email": "late@hotel.test", "otp": code }))
        .await;
    assert_eq!(resp.body["message"], "OTP has already been used");
}

#[tokio::test]
async fn otp_requests_are_rate_limited_per_email() {
    let app = TestApp::spawn_with(|cfg| cfg.otp_requests_per_minute = 1).await;

    let first = app.post("/send-otp", None, json!({ "email": "spam@hotel.test" })).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.post("/send-otp", None, json!({ "email": "SPAM@hotel.test" })).await;
    assert_eq!(second.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(second.body["code"], "RATE_LIMIT");
    assert_eq!(app.mailer.count(), 1);

    let other = app.post("/send-otp", None, json!({ "email": "calm@hotel.test" })).await;
    assert_eq!(other.status, StatusCode::OK);
}

#[tokio::test]
async fn send_otp_requires_an_email() {
    let app = TestApp::spawn().await;
    let resp = app.post("/send-otp", None, json!({ "email": "   " })).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Email is required");
    assert_eq!(app.mailer.count(), 0);
}
