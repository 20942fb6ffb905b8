//! The submission outcome wire contract, as decoded from the server.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Outcome of one submission attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionOutcome {
    pub success: bool,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub redirect: Option<String>,

    #[serde(default)]
    pub errors: Option<BTreeMap<String, String>>,
}
