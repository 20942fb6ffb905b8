#![allow(clippy::unwrap_used, clippy::expect_used)]
//! CSRF token lifecycle tests.

mod common;

use common::{TestApp, read_json, valid_contact_fields};

#[tokio::test]
async fn each_fetch_issues_a_distinct_token() {
    let app = TestApp::new();
    let (first, cookies) = app.fetch_token().await;

    // Same session, second fetch
    let response = app
        .request_with_cookies(
            axum::http::Request::get("/forms/token")
                .body(axum::body::Body::empty())
                .unwrap(),
            &cookies,
        )
        .await;
    let body = read_json(response).await;
    let second = body["token"].as_str().unwrap().to_string();

    assert_eq!(first.len(), 64);
    assert_eq!(second.len(), 64);
    assert_ne!(first, second);
}

#[tokio::test]
async fn missing_token_is_rejected() {
    let app = TestApp::new();
    let (_, cookies) = app.fetch_token().await;

    let fields = vec![
        ("name", "Jane Mariner"),
        ("email", "jane@example.com"),
        ("subject", "Vessel inspection"),
        ("message", "We would like to schedule an inspection."),
    ];
    let response = app.post_form("/forms/contact", &fields, &cookies).await;
    let body = read_json(response).await;

    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Invalid or expired form token. Please try again."
    );
    assert!(app.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn a_token_is_single_use() {
    let app = TestApp::new();
    let (token, cookies) = app.fetch_token().await;

    let response = app
        .post_form("/forms/contact", &valid_contact_fields(&token), &cookies)
        .await;
    let body = read_json(response).await;
    assert_eq!(body["success"], true);

    // Replaying the consumed token fails
    let response = app
        .post_form("/forms/contact", &valid_contact_fields(&token), &cookies)
        .await;
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Invalid or expired form token. Please try again."
    );
    assert_eq!(app.mailer.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn a_token_is_consumed_even_when_validation_fails() {
    let app = TestApp::new();
    let (token, cookies) = app.fetch_token().await;

    // First attempt fails validation but consumes the token
    let mut fields = valid_contact_fields(&token);
    fields[1] = ("email", "a@b");
    let response = app.post_form("/forms/contact", &fields, &cookies).await;
    let body = read_json(response).await;
    assert_eq!(body["message"], "Invalid email address");

    // Retrying with the same token is a token failure now
    let response = app
        .post_form("/forms/contact", &valid_contact_fields(&token), &cookies)
        .await;
    let body = read_json(response).await;
    assert_eq!(
        body["message"],
        "Invalid or expired form token. Please try again."
    );
}

#[tokio::test]
async fn a_token_does_not_cross_sessions() {
    let app = TestApp::new();
    let (token, _their_cookies) = app.fetch_token().await;

    // A different visitor (fresh session) echoes the stolen token
    let (_own_token, own_cookies) = app.fetch_token().await;
    let response = app
        .post_form("/forms/contact", &valid_contact_fields(&token), &own_cookies)
        .await;
    let body = read_json(response).await;

    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Invalid or expired form token. Please try again."
    );
}
