//! Careers catalog API.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::careers::JobPosting;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Create the careers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/jobs", get(list_jobs))
        .route("/api/jobs/{id}", get(get_job))
}

/// List all open positions.
///
/// GET /api/jobs
async fn list_jobs(State(state): State<AppState>) -> Json<Vec<JobPosting>> {
    Json(state.jobs().to_vec())
}

/// Fetch one position by id.
///
/// GET /api/jobs/{id}
async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<JobPosting>> {
    state
        .jobs()
        .iter()
        .find(|job| job.id == id)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound)
}
