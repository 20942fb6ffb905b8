//! Health check endpoint.
//!
//! Always 200 while the process serves; `status` degrades when the mail
//! relay is unconfigured, since submissions are then logged instead of
//! delivered.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    mail_relay: bool,
    postings: usize,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mail_relay = state.mailer().is_some();

    Json(HealthResponse {
        status: if mail_relay { "healthy" } else { "degraded" },
        mail_relay,
        postings: state.jobs().len(),
    })
}

/// Create the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
