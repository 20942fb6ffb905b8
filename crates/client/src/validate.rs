//! Client-side validation.
//!
//! First line of defense only; the server re-derives every constraint.
//! All fields are checked and all errors surfaced together, one message
//! per invalid field.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::form::{FieldControl, FormDocument};

/// Upload ceiling, matching the server's attachment limit (10 MiB).
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Simple `local@domain.tld` shape.
#[allow(clippy::expect_used)]
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex literal"));

/// Check every field; returns one error message per invalid field.
pub fn validate(form: &FormDocument) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    for field in form.fields() {
        let message = if field.required
            && field.value.trim().is_empty()
            && !matches!(field.control, FieldControl::File)
        {
            Some(format!("{} is required.", field.label))
        } else {
            match field.control {
                FieldControl::Email if !field.value.trim().is_empty() => {
                    (!EMAIL_SHAPE.is_match(field.value.trim()))
                        .then(|| "Please enter a valid email address.".to_string())
                }
                FieldControl::File => match &field.file {
                    Some(file) if file.data.len() > MAX_FILE_BYTES => {
                        Some("File size cannot exceed 10MB.".to_string())
                    }
                    None if field.required => Some(format!("{} is required.", field.label)),
                    _ => None,
                },
                _ => None,
            }
        };

        if let Some(message) = message {
            errors.insert(field.name.clone(), message);
        }
    }

    errors
}

/// Validate and paint: clears previous error state, attaches a message to
/// each invalid field, and reports whether the form may be submitted.
pub fn run(form: &mut FormDocument) -> bool {
    form.clear_errors();
    let errors = validate(form);
    if errors.is_empty() {
        return true;
    }
    form.apply_errors(errors.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    false
}
