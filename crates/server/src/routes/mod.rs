//! HTTP route handlers.

pub mod forms;
pub mod health;
pub mod jobs;
pub mod static_files;

use axum::Router;

use crate::state::AppState;

/// Assemble the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(forms::router())
        .merge(health::router())
        .merge(jobs::router())
        .merge(static_files::router())
}
