#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Tests drive the REAL router with the real session layer; only the mail
//! relay is substituted, either with a recording mailer or a failing one.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_sessions::cookie::SameSite;

use quayside_server::config::Config;
use quayside_server::routes;
use quayside_server::services::mailer::{Mailer, OutboundEmail};
use quayside_server::session;
use quayside_server::state::AppState;

/// Multipart boundary used by the test request builders.
pub const BOUNDARY: &str = "quayside-test-boundary";

/// Mail relay that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<()> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Mail relay that always fails with transport detail that must never
/// reach a response body.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: OutboundEmail) -> Result<()> {
        anyhow::bail!("SMTP AUTH LOGIN failed for relay-user with secret-credential")
    }
}

/// Configuration for tests: no SMTP (the mailer is injected), catalog from
/// the workspace seed file.
pub fn test_config() -> Config {
    let workspace_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root");

    Config {
        port: 0,
        site_dir: workspace_root.join("site"),
        careers_file: workspace_root.join("careers.yml"),
        cors_allowed_origins: vec!["*".to_string()],
        cookie_same_site: "strict".to_string(),
        smtp_host: None,
        smtp_port: 587,
        smtp_username: None,
        smtp_password: None,
        smtp_encryption: "starttls".to_string(),
        smtp_timeout_secs: 5,
        smtp_from_email: "noreply@example.com".to_string(),
        notify_email: "inbox@example.com".to_string(),
        site_name: "Quayside Marine".to_string(),
        thank_you_url: "/thank-you.html".to_string(),
    }
}

/// A test application with an injected mail relay.
pub struct TestApp {
    router: Router,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    /// Build an app whose relay records messages.
    pub fn new() -> Self {
        let mailer = Arc::new(RecordingMailer::default());
        let router = build_router(mailer.clone());
        Self { router, mailer }
    }

    /// Build an app whose relay always fails.
    pub fn failing() -> Self {
        Self {
            router: build_router(Arc::new(FailingMailer)),
            // Unused; present so the struct shape stays the same.
            mailer: Arc::new(RecordingMailer::default()),
        }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("failed to send request")
    }

    /// Send a request with cookies from a previous response.
    pub async fn request_with_cookies(
        &self,
        mut request: Request<Body>,
        cookies: &str,
    ) -> Response {
        if !cookies.is_empty() {
            request
                .headers_mut()
                .insert(header::COOKIE, cookies.parse().expect("invalid cookie"));
        }
        self.request(request).await
    }

    /// Fetch a CSRF token, returning it with the session cookies.
    pub async fn fetch_token(&self) -> (String, String) {
        let response = self
            .request(Request::get("/forms/token").body(Body::empty()).unwrap())
            .await;
        assert_eq!(response.status(), 200);

        let cookies = extract_cookies(&response);
        let body = read_json(response).await;
        let token = body["token"].as_str().expect("token in response").to_string();
        (token, cookies)
    }

    /// POST a form as the site's fetch path does (AJAX, multipart).
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        cookies: &str,
    ) -> Response {
        let request = Request::post(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("x-requested-with", "XMLHttpRequest")
            .body(Body::from(multipart_body(fields)))
            .unwrap();
        self.request_with_cookies(request, cookies).await
    }

    /// POST a form with a file part.
    pub async fn post_form_with_file(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        file: (&str, &str, &str, &[u8]),
        cookies: &str,
    ) -> Response {
        let request = Request::post(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("x-requested-with", "XMLHttpRequest")
            .body(Body::from(multipart_body_with_file(fields, file)))
            .unwrap();
        self.request_with_cookies(request, cookies).await
    }
}

fn build_router(mailer: Arc<dyn Mailer>) -> Router {
    let config = test_config();
    let state = AppState::with_mailer(&config, mailer).expect("failed to build test state");
    let session_layer = session::create_session_layer(SameSite::Strict);

    routes::router().layer(session_layer).with_state(state)
}

/// Extract Set-Cookie headers from a response for use in subsequent requests.
pub fn extract_cookies(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Read a response body as JSON.
pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

/// Build a multipart body from text fields.
pub fn multipart_body(fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Build a multipart body from text fields plus one file part.
pub fn multipart_body_with_file(
    fields: &[(&str, &str)],
    (field, filename, content_type, data): (&str, &str, &str, &[u8]),
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// A complete, valid contact form field set (token slot filled by caller).
pub fn valid_contact_fields<'a>(token: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", "Jane Mariner"),
        ("email", "jane@example.com"),
        ("subject", "Vessel inspection inquiry"),
        ("message", "We would like to schedule a hull inspection next month."),
        ("csrf_token", token),
    ]
}

/// A complete, valid career form field set.
pub fn valid_career_fields<'a>(token: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", "Jane Mariner"),
        ("email", "jane@example.com"),
        ("phone", "+91 98765 43210"),
        ("position", "Marine Engineer"),
        ("experience", "7"),
        ("csrf_token", token),
    ]
}

/// A complete, valid RFQ form field set.
pub fn valid_rfq_fields<'a>(token: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", "Jane Mariner"),
        ("email", "jane@example.com"),
        ("company", "Harbor Logistics"),
        ("service", "Subsea Inspection"),
        ("details", "Two pipelines, roughly 40km in total, survey before Q3."),
        ("csrf_token", token),
    ]
}
