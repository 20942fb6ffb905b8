//! End-to-end submission flow.
//!
//! Drives one attempt through the phases: validate, transport, render.
//! One attempt in flight per driver; nothing is retried and no partial
//! progress survives between attempts.

use tracing::warn;

use crate::form::FormDocument;
use crate::render::{self, SubmissionPhase, UiState};
use crate::transport::{SubmitClient, TransportError};
use crate::validate;

/// Drives submissions for one form.
#[derive(Debug, Default)]
pub struct SubmissionDriver {
    phase: SubmissionPhase,
}

impl SubmissionDriver {
    pub fn new() -> Self {
        Self {
            phase: SubmissionPhase::Idle,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Run one submission attempt.
    ///
    /// Client-invalid forms never reach the network. After any server
    /// round-trip the consumed CSRF token is replaced; a failed replacement
    /// is logged and left for the next page interaction.
    pub async fn run(&mut self, client: &SubmitClient, form: &mut FormDocument) -> UiState {
        if self.phase != SubmissionPhase::Idle {
            warn!("submission attempt while another is in flight, ignored");
            return UiState::default();
        }

        self.phase = SubmissionPhase::Validating;
        let errors = validate::validate(form);
        if !errors.is_empty() {
            self.phase = SubmissionPhase::Idle;
            return render::apply_validation_failure(form, errors);
        }

        self.phase = SubmissionPhase::Submitting;
        let result = client.submit(form).await;
        self.phase = SubmissionPhase::Idle;

        let ui = match result {
            Ok(outcome) => render::apply_outcome(form, &outcome),
            Err(TransportError::Busy) => {
                warn!("form is busy, submission ignored");
                return UiState::default();
            }
            Err(e) => {
                warn!(error = %e, "submission transport failed");
                render::apply_network_failure(form)
            }
        };

        if ui.refresh_token {
            match client.fetch_token().await {
                Ok(token) => form.set_token(token),
                Err(e) => warn!(error = %e, "failed to refresh CSRF token"),
            }
        }

        ui
    }
}
