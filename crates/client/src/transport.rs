//! Submission transport.
//!
//! One multipart POST per attempt, no automatic retries. The form's busy
//! flag is held by an RAII guard for the duration of the request, so the
//! submit control is restored on success, rejection, and network failure
//! alike.

use reqwest::multipart;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::form::{FieldControl, FormDocument};
use crate::outcome::SubmissionOutcome;

/// Transport failures. Everything here is terminal for the attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("a submission is already in flight")]
    Busy,
}

/// Holds a form's busy flag for the lifetime of one request.
struct BusyGuard<'a> {
    form: &'a mut FormDocument,
}

impl<'a> BusyGuard<'a> {
    fn acquire(form: &'a mut FormDocument) -> Result<Self, TransportError> {
        if form.is_busy() {
            return Err(TransportError::Busy);
        }
        form.set_busy(true);
        Ok(Self { form })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.form.set_busy(false);
    }
}

impl std::ops::Deref for BusyGuard<'_> {
    type Target = FormDocument;

    fn deref(&self) -> &FormDocument {
        self.form
    }
}

/// Client for the form API.
pub struct SubmitClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

impl SubmitClient {
    /// Create a client against a site base URL.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Fetch a fresh CSRF token for this session.
    pub async fn fetch_token(&self) -> Result<String, TransportError> {
        let url = self.base_url.join("/forms/token")?;
        let response = self.http.get(url).send().await?;
        let body: TokenResponse = response.json().await?;
        Ok(body.token)
    }

    /// Submit a validated form and decode the outcome.
    ///
    /// Returns [`TransportError::Busy`] if a submission is already in
    /// flight for this form.
    pub async fn submit(
        &self,
        form: &mut FormDocument,
    ) -> Result<SubmissionOutcome, TransportError> {
        let guard = BusyGuard::acquire(form)?;

        let url = self.base_url.join(&guard.action)?;

        let mut parts = multipart::Form::new().text("csrf_token", guard.token().to_string());
        for field in guard.fields() {
            match field.control {
                FieldControl::File => {
                    if let Some(file) = &field.file {
                        let part = multipart::Part::bytes(file.data.clone())
                            .file_name(file.filename.clone())
                            .mime_str(&file.content_type)?;
                        parts = parts.part(field.name.clone(), part);
                    }
                }
                _ => {
                    parts = parts.text(field.name.clone(), field.value.clone());
                }
            }
        }

        let response = self
            .http
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .multipart(parts)
            .send()
            .await?;

        let outcome: SubmissionOutcome = response.json().await?;
        Ok(outcome)
        // guard drops here and on every early return, restoring the control
    }
}
