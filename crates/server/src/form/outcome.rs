//! The submission outcome wire contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of one submission attempt, as sent to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// Whether the submission was relayed.
    pub success: bool,

    /// Human-readable summary shown in the notification banner.
    pub message: String,

    /// Where the client should navigate after a success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    /// Per-field error messages, when the failure maps to specific fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl SubmissionOutcome {
    /// A relayed submission.
    pub fn accepted(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            redirect: Some(redirect.into()),
            errors: None,
        }
    }

    /// A rejected submission with no field detail.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            redirect: None,
            errors: None,
        }
    }

    /// A rejected submission with a field-error map.
    pub fn rejected_fields(
        message: impl Into<String>,
        errors: BTreeMap<String, String>,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            redirect: None,
            errors: Some(errors),
        }
    }
}
