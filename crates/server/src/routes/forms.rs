//! Form submission route handlers.
//!
//! One parameterized handler serves all three endpoints; each wrapper only
//! supplies its [`FormEndpoint`] configuration. The pipeline per request:
//! CSRF verify-and-consume → validation → spam screen → render → dispatch.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_sessions::Session;
use tracing::{error, info, warn};

use crate::error::AppResult;
use crate::form::{FormEndpoint, Submission, SubmissionOutcome, csrf, spam, validate};
use crate::state::AppState;

/// Session key for the error stashed by the non-AJAX flow.
const FORM_ERROR_SESSION_KEY: &str = "form_error";

/// Body ceiling: the 10 MiB attachment plus multipart overhead.
const BODY_LIMIT: usize = 12 * 1024 * 1024;

/// Create the forms router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forms/token", get(issue_token))
        .route("/forms/error", get(take_stashed_error))
        .route("/forms/contact", post(submit_contact))
        .route("/forms/career", post(submit_career))
        .route("/forms/rfq", post(submit_rfq))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

/// Token response.
#[derive(Debug, Serialize)]
struct TokenResponse {
    token: String,
}

/// Issue a fresh CSRF token for the visitor's session.
///
/// GET /forms/token
async fn issue_token(session: Session) -> AppResult<Json<TokenResponse>> {
    let token = csrf::issue_token(&session).await?;
    Ok(Json(TokenResponse { token }))
}

/// Error stashed by a non-AJAX submission, consumed on read.
#[derive(Debug, Serialize)]
struct StashedError {
    message: Option<String>,
}

/// Surface (and clear) the error stashed by the redirect flow.
///
/// GET /forms/error
async fn take_stashed_error(session: Session) -> AppResult<Json<StashedError>> {
    let message = session
        .remove::<String>(FORM_ERROR_SESSION_KEY)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read stashed form error: {}", e))?;
    Ok(Json(StashedError { message }))
}

/// POST /forms/contact
async fn submit_contact(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    submit(state, session, headers, multipart, FormEndpoint::contact()).await
}

/// POST /forms/career
async fn submit_career(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    submit(state, session, headers, multipart, FormEndpoint::career()).await
}

/// POST /forms/rfq
async fn submit_rfq(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    submit(state, session, headers, multipart, FormEndpoint::rfq()).await
}

/// Process one submission against an endpoint configuration.
async fn submit(
    state: AppState,
    session: Session,
    headers: HeaderMap,
    mut multipart: Multipart,
    endpoint: FormEndpoint,
) -> Response {
    let form = endpoint.kind.as_str();
    let ajax = is_ajax(&headers);
    let back = error_redirect_target(&headers, &endpoint);

    let submission = match Submission::from_multipart(&mut multipart, &endpoint).await {
        Ok(submission) => submission,
        Err(e) => {
            info!(form, error = %e, "rejected unreadable submission");
            return reply(
                SubmissionOutcome::rejected(e.to_string()),
                ajax,
                &back,
                &session,
            )
            .await;
        }
    };

    // The token is consumed whether or not the rest of the pipeline passes;
    // the client fetches a fresh one after every completed attempt.
    match csrf::verify_token(&session, submission.csrf_token()).await {
        Ok(true) => {}
        Ok(false) => {
            info!(form, "rejected submission with invalid or expired CSRF token");
            return reply(
                SubmissionOutcome::rejected("Invalid or expired form token. Please try again."),
                ajax,
                &back,
                &session,
            )
            .await;
        }
        Err(e) => {
            error!(form, error = %e, "CSRF verification failed");
            return reply(
                SubmissionOutcome::rejected(endpoint.failure_message),
                ajax,
                &back,
                &session,
            )
            .await;
        }
    }

    if let Err(rejection) = validate::validate(&endpoint, &submission) {
        info!(form, message = %rejection.message, "submission failed validation");
        return reply(
            SubmissionOutcome::rejected_fields(rejection.message, rejection.errors),
            ajax,
            &back,
            &session,
        )
        .await;
    }

    if spam::looks_like_spam(&endpoint, &submission) {
        // Which heuristic fired is deliberately not revealed.
        info!(form, "submission rejected by spam screen");
        return reply(
            SubmissionOutcome::rejected(endpoint.spam_message),
            ajax,
            &back,
            &session,
        )
        .await;
    }

    let accepted = SubmissionOutcome::accepted(
        endpoint.success_message,
        state.config().thank_you_url.clone(),
    );

    let Some(mailer) = state.mailer() else {
        warn!(form, "SMTP not configured; submission accepted and logged only");
        return reply(accepted, ajax, &back, &session).await;
    };

    let email = match state.renderer().render(&endpoint, &submission, state.config()) {
        Ok(email) => email,
        Err(e) => {
            error!(form, error = %e, "failed to render notification");
            return reply(
                SubmissionOutcome::rejected(endpoint.failure_message),
                ajax,
                &back,
                &session,
            )
            .await;
        }
    };

    match mailer.send(email).await {
        Ok(()) => {
            info!(form, "submission relayed");
            reply(accepted, ajax, &back, &session).await
        }
        Err(e) => {
            // Transport detail stays in the log; the caller sees the
            // generic failure message.
            error!(form, error = %e, "mail dispatch failed");
            reply(
                SubmissionOutcome::rejected(endpoint.failure_message),
                ajax,
                &back,
                &session,
            )
            .await
        }
    }
}

/// Render an outcome as JSON (AJAX) or as the redirect flow.
async fn reply(
    outcome: SubmissionOutcome,
    ajax: bool,
    back: &str,
    session: &Session,
) -> Response {
    if ajax {
        return Json(outcome).into_response();
    }

    if outcome.success {
        let target = outcome.redirect.as_deref().unwrap_or("/");
        Redirect::to(target).into_response()
    } else {
        if let Err(e) = session.insert(FORM_ERROR_SESSION_KEY, &outcome.message).await {
            warn!(error = %e, "failed to stash form error in session");
        }
        Redirect::to(back).into_response()
    }
}

/// Whether the request came from the site's fetch-based submit path.
fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("xmlhttprequest"))
}

/// Where a failed non-AJAX submission returns to: the referring page with
/// the form's anchor, or the front page when there is no referrer.
fn error_redirect_target(headers: &HeaderMap, endpoint: &FormEndpoint) -> String {
    let referer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/");
    format!("{}#{}", referer, endpoint.anchor)
}
