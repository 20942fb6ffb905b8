#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Static site serving tests.

mod common;

use axum::body::Body;
use axum::http::{Request, header};
use common::TestApp;
use http_body_util::BodyExt;

#[tokio::test]
async fn front_page_is_served() {
    let app = TestApp::new();
    let response = app
        .request(Request::get("/").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("contact-section"));
}

#[tokio::test]
async fn extensionless_page_paths_resolve_to_html() {
    let app = TestApp::new();
    let response = app
        .request(Request::get("/thank-you").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html"
    );
}

#[tokio::test]
async fn assets_get_long_lived_cache_headers() {
    let app = TestApp::new();
    let response = app
        .request(
            Request::get("/static/css/main.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css"
    );
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=86400"
    );
}

#[tokio::test]
async fn path_traversal_is_blocked() {
    let app = TestApp::new();
    let response = app
        .request(
            Request::get("/static/../../Cargo.toml")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn missing_page_is_404() {
    let app = TestApp::new();
    let response = app
        .request(Request::get("/no-such-page").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), 404);
}
