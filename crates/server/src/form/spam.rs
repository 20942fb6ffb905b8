//! Spam screening heuristics.
//!
//! Fixed pattern rules, no external services. A screened submission is
//! rejected with the endpoint's generic spam message; which rule fired is
//! never revealed to the caller.

use std::sync::LazyLock;

use regex::Regex;

use super::endpoint::FormEndpoint;
use super::submission::Submission;

/// URL-like or email-like content in a name field.
#[allow(clippy::expect_used)]
static NAME_SPAM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(http|www\.|@.*\.)").expect("valid regex literal"));

/// Keyword denylist applied to contact-style message bodies.
#[allow(clippy::expect_used)]
static SPAM_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(viagra|casino|lottery|winner|congratulations)\b")
        .expect("valid regex literal")
});

/// Screen a validated submission. Returns true if it looks like spam.
pub fn looks_like_spam(endpoint: &FormEndpoint, submission: &Submission) -> bool {
    let name = submission.field("name");
    if NAME_SPAM_PATTERN.is_match(name) {
        return true;
    }

    let message = submission.field(endpoint.message_field);
    if message.is_empty() {
        return false;
    }

    if count_http_refs(message) > endpoint.spam.max_http_refs {
        return true;
    }

    if endpoint.spam.keyword_denylist && SPAM_KEYWORDS.is_match(message) {
        return true;
    }

    false
}

/// Count non-overlapping case-insensitive occurrences of "http".
fn count_http_refs(text: &str) -> usize {
    text.to_lowercase().matches("http").count()
}
