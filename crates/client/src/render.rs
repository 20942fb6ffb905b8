//! Outcome rendering.
//!
//! Folds a submission result back into UI state: banner, per-field errors,
//! form clearing, and the token-refresh request. The phases of one attempt:
//!
//! ```text
//! Idle → Validating → (Invalid → Idle)
//! Idle → Validating → Submitting → (Success | ServerRejected | NetworkError) → Idle
//! ```

use std::collections::BTreeMap;

use crate::form::FormDocument;
use crate::outcome::SubmissionOutcome;

/// Phase of a single submission attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Banner severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// A notification banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

/// UI state produced by one completed attempt.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Banner to show, if any.
    pub banner: Option<Banner>,

    /// Errors painted beside their fields.
    pub field_errors: BTreeMap<String, String>,

    /// Whether the form was cleared.
    pub form_cleared: bool,

    /// Whether a fresh CSRF token should be fetched.
    pub refresh_token: bool,

    /// Whether the banner should be scrolled into view.
    pub scroll_to_banner: bool,

    /// Navigation target after a success.
    pub redirect: Option<String>,
}

/// Fold a server outcome into the form and the resulting UI state.
///
/// Every server round-trip consumed the CSRF token, so `refresh_token` is
/// set on success and rejection alike.
pub fn apply_outcome(form: &mut FormDocument, outcome: &SubmissionOutcome) -> UiState {
    if outcome.success {
        form.reset();
        return UiState {
            banner: Some(Banner {
                kind: BannerKind::Success,
                message: pick_message(&outcome.message, "Your submission was successful!"),
            }),
            field_errors: BTreeMap::new(),
            form_cleared: true,
            refresh_token: true,
            scroll_to_banner: true,
            redirect: outcome.redirect.clone(),
        };
    }

    form.clear_errors();

    match &outcome.errors {
        Some(errors) => {
            form.apply_errors(errors.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            UiState {
                banner: Some(Banner {
                    kind: BannerKind::Error,
                    message: pick_message(&outcome.message, "Please correct the errors below."),
                }),
                field_errors: errors.clone(),
                form_cleared: false,
                refresh_token: true,
                scroll_to_banner: true,
                redirect: None,
            }
        }
        None => UiState {
            banner: Some(Banner {
                kind: BannerKind::Error,
                message: pick_message(
                    &outcome.message,
                    "An unexpected error occurred. Please try again.",
                ),
            }),
            field_errors: BTreeMap::new(),
            form_cleared: false,
            refresh_token: true,
            scroll_to_banner: true,
            redirect: None,
        },
    }
}

/// UI state after the request itself failed. The token was not consumed,
/// so no refresh is requested; the user may retry manually.
pub fn apply_network_failure(form: &mut FormDocument) -> UiState {
    form.clear_errors();
    UiState {
        banner: Some(Banner {
            kind: BannerKind::Error,
            message: "A network error occurred. Please check your connection and try again."
                .to_string(),
        }),
        field_errors: BTreeMap::new(),
        form_cleared: false,
        refresh_token: false,
        scroll_to_banner: true,
        redirect: None,
    }
}

/// UI state after client-side validation blocked the submission. Errors sit
/// beside their fields; nothing reached the network.
pub fn apply_validation_failure(
    form: &mut FormDocument,
    errors: BTreeMap<String, String>,
) -> UiState {
    form.clear_errors();
    form.apply_errors(errors.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    UiState {
        banner: None,
        field_errors: errors,
        form_cleared: false,
        refresh_token: false,
        scroll_to_banner: false,
        redirect: None,
    }
}

fn pick_message(message: &str, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}
