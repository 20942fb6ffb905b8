//! Submission records parsed from multipart form bodies.

use std::collections::BTreeMap;

use axum::extract::Multipart;
use thiserror::Error;
use tracing::warn;

use super::endpoint::FormEndpoint;

/// Attachment size ceiling (10 MiB), mirrored by the client-side check.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// Content types accepted for an uploaded resume, as sniffed from the bytes.
const ALLOWED_ATTACHMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Errors raised while reading a multipart submission.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("File size cannot exceed 10MB.")]
    AttachmentTooLarge,

    #[error("Resume must be a PDF or Word document.")]
    UnsupportedAttachment,

    #[error("Malformed form data")]
    Malformed,
}

/// An uploaded file carried by a submission.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// An immutable record of one form submission: trimmed field values plus an
/// optional attachment. Lives for the duration of one request.
#[derive(Debug)]
pub struct Submission {
    fields: BTreeMap<String, String>,
    attachment: Option<Attachment>,
}

impl Submission {
    /// Read a submission from a multipart body.
    ///
    /// Text fields are trimmed on the way in. A file part is only accepted
    /// on the endpoint's configured attachment field; parts without a
    /// filename or with empty content (a file input left unset) are skipped.
    pub async fn from_multipart(
        multipart: &mut Multipart,
        endpoint: &FormEndpoint,
    ) -> Result<Self, SubmissionError> {
        let mut fields = BTreeMap::new();
        let mut attachment = None;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "failed to read multipart field");
                    return Err(SubmissionError::Malformed);
                }
            };

            let Some(name) = field.name().map(|s| s.to_string()) else {
                continue;
            };

            if field.file_name().is_some() {
                if Some(name.as_str()) != endpoint.attachment_field {
                    continue; // unexpected file part
                }
                let filename = field
                    .file_name()
                    .unwrap_or("attachment")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| SubmissionError::AttachmentTooLarge)?;
                if bytes.is_empty() {
                    continue;
                }
                if bytes.len() > MAX_ATTACHMENT_BYTES {
                    return Err(SubmissionError::AttachmentTooLarge);
                }
                let content_type = sniff_attachment_type(&bytes)?;
                attachment = Some(Attachment {
                    filename,
                    content_type,
                    data: bytes.to_vec(),
                });
            } else {
                let value = field.text().await.map_err(|e| {
                    warn!(field = %name, error = %e, "failed to read form field");
                    SubmissionError::Malformed
                })?;
                fields.insert(name, value.trim().to_string());
            }
        }

        Ok(Self { fields, attachment })
    }

    /// Build a submission from already-parsed fields.
    pub fn from_fields(fields: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k, v.trim().to_string()))
                .collect(),
            attachment: None,
        }
    }

    /// Get a field value; absent fields read as empty.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// The echoed CSRF token.
    pub fn csrf_token(&self) -> &str {
        self.field("csrf_token")
    }

    /// All field names and values.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }
}

/// Sniff an attachment's content type from its bytes and check it against
/// the allow-list. The client-declared type is not trusted.
fn sniff_attachment_type(data: &[u8]) -> Result<String, SubmissionError> {
    let kind = infer::get(data).ok_or(SubmissionError::UnsupportedAttachment)?;
    let mime = kind.mime_type();
    if ALLOWED_ATTACHMENT_TYPES.contains(&mime) {
        Ok(mime.to_string())
    } else {
        Err(SubmissionError::UnsupportedAttachment)
    }
}
