//! Server-side submission validation.
//!
//! Every constraint the client enforces is re-derived here, since the client
//! check is bypassable. Required-field emptiness is checked across all
//! fields first; shape checks then run in rule order and stop at the first
//! failure.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::endpoint::FormEndpoint;
use super::submission::Submission;

/// Maximum accepted email address length.
pub const EMAIL_MAX_LEN: usize = 254;

/// Allowed characters in a person's name.
///
/// # Panics
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s.'\-]+$").expect("valid regex literal"));

/// Email shape: local@domain with a dotted TLD. Rejects dotless domains
/// like `a@b`.
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("valid regex literal")
});

/// Loose international phone shape, 10-15 characters including separators.
#[allow(clippy::expect_used)]
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,15}$").expect("valid regex literal"));

/// Shape constraint for one field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Person name: 2-100 characters from the name allow-list.
    Name,

    /// RFC-shaped email address, bounded at [`EMAIL_MAX_LEN`].
    Email,

    /// Loose international phone number.
    Phone,

    /// Free text bounded to a character range.
    Text { min: usize, max: usize },

    /// Numeric value within an inclusive range.
    Number { min: i64, max: i64 },
}

/// Validation rule for one named field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldRule {
    pub fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            required: true,
            kind,
        }
    }

    pub fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            required: false,
            kind,
        }
    }
}

/// A rejected submission: the summary message plus the per-field error map.
#[derive(Debug, Clone)]
pub struct Rejection {
    pub message: String,
    pub errors: BTreeMap<String, String>,
}

/// Validate a submission against an endpoint's rules.
///
/// Returns the first failure found. Field order is significant:
/// required-field emptiness across the whole form is reported before any
/// shape check runs.
pub fn validate(endpoint: &FormEndpoint, submission: &Submission) -> Result<(), Rejection> {
    let mut missing = BTreeMap::new();
    for rule in &endpoint.rules {
        if rule.required && submission.field(rule.name).is_empty() {
            missing.insert(
                rule.name.to_string(),
                format!("{} is required.", rule.label),
            );
        }
    }
    if !missing.is_empty() {
        return Err(Rejection {
            message: endpoint.required_message.to_string(),
            errors: missing,
        });
    }

    for rule in &endpoint.rules {
        let value = submission.field(rule.name);
        if value.is_empty() {
            continue; // optional and absent
        }
        if let Some(message) = check_field(rule, value) {
            let mut errors = BTreeMap::new();
            errors.insert(rule.name.to_string(), message.clone());
            return Err(Rejection { message, errors });
        }
    }

    Ok(())
}

/// Check one non-empty value against its rule. Returns the error message on
/// failure.
fn check_field(rule: &FieldRule, value: &str) -> Option<String> {
    match rule.kind {
        FieldKind::Name => {
            let len = value.chars().count();
            if !(2..=100).contains(&len) {
                return Some(format!(
                    "{} must be between 2 and 100 characters",
                    rule.label
                ));
            }
            if !NAME_PATTERN.is_match(value) {
                return Some(format!("{} contains invalid characters", rule.label));
            }
            None
        }
        FieldKind::Email => {
            if !EMAIL_PATTERN.is_match(value) {
                return Some("Invalid email address".to_string());
            }
            if value.chars().count() > EMAIL_MAX_LEN {
                return Some("Email address is too long".to_string());
            }
            None
        }
        FieldKind::Phone => {
            if !PHONE_PATTERN.is_match(value) {
                return Some("Invalid phone number format".to_string());
            }
            None
        }
        FieldKind::Text { min, max } => {
            let len = value.chars().count();
            if len < min || len > max {
                return Some(format!(
                    "{} must be between {min} and {max} characters",
                    rule.label
                ));
            }
            None
        }
        FieldKind::Number { min, max } => {
            let parsed: Option<f64> = value.parse().ok();
            match parsed {
                Some(n) if n >= min as f64 && n <= max as f64 => None,
                _ => Some(format!(
                    "{} must be a valid number between {min} and {max}",
                    rule.label
                )),
            }
        }
    }
}
