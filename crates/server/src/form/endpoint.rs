//! Per-endpoint form configuration.
//!
//! The three public forms are three values of one [`FormEndpoint`] type
//! consumed by a single submission handler, rather than three copies of the
//! pipeline.

use super::validate::{FieldKind, FieldRule};

/// Which form an endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Career,
    Rfq,
}

impl FormKind {
    /// Stable identifier used in logs and template names.
    pub fn as_str(self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Career => "career",
            FormKind::Rfq => "rfq",
        }
    }
}

/// Spam screening knobs for one endpoint.
#[derive(Debug, Clone, Copy)]
pub struct SpamPolicy {
    /// Occurrences of "http" tolerated in the message body.
    pub max_http_refs: usize,

    /// Whether the fixed keyword denylist applies to the message body.
    pub keyword_denylist: bool,
}

/// Configuration for one form endpoint: field rules, spam policy, and the
/// notification email to produce.
#[derive(Debug, Clone)]
pub struct FormEndpoint {
    pub kind: FormKind,

    /// Field rules, in validation order.
    pub rules: Vec<FieldRule>,

    /// Name of the free-text field the spam body checks run on.
    pub message_field: &'static str,

    pub spam: SpamPolicy,

    /// Multipart field name of the accepted attachment, if any.
    pub attachment_field: Option<&'static str>,

    /// Subject line is "{subject_prefix} - {value of subject_field}".
    pub subject_prefix: &'static str,
    pub subject_field: &'static str,

    /// Tera template for the HTML notification body.
    pub template: &'static str,

    /// Whether to also render a plain-text alternative.
    pub plain_text_alt: bool,

    /// Messages surfaced to the visitor.
    pub required_message: &'static str,
    pub spam_message: &'static str,
    pub success_message: &'static str,
    pub failure_message: &'static str,

    /// Fragment appended to the referrer on the non-AJAX error redirect.
    pub anchor: &'static str,
}

impl FormEndpoint {
    /// The contact form.
    pub fn contact() -> Self {
        Self {
            kind: FormKind::Contact,
            rules: vec![
                FieldRule::required("name", "Name", FieldKind::Name),
                FieldRule::required("email", "Email", FieldKind::Email),
                FieldRule::required("subject", "Subject", FieldKind::Text { min: 5, max: 200 }),
                FieldRule::required("message", "Message", FieldKind::Text { min: 10, max: 2000 }),
            ],
            message_field: "message",
            spam: SpamPolicy {
                max_http_refs: 2,
                keyword_denylist: true,
            },
            attachment_field: None,
            subject_prefix: "Contact Form Submission",
            subject_field: "subject",
            template: "contact.html",
            plain_text_alt: true,
            required_message: "All fields are required",
            spam_message: "Your message appears to be spam",
            success_message: "Message sent successfully!",
            failure_message: "Message could not be sent. Please try again later.",
            anchor: "contact-section",
        }
    }

    /// The job application form.
    pub fn career() -> Self {
        Self {
            kind: FormKind::Career,
            rules: vec![
                FieldRule::required("name", "Name", FieldKind::Name),
                FieldRule::required("email", "Email", FieldKind::Email),
                FieldRule::required("phone", "Phone", FieldKind::Phone),
                FieldRule::required("position", "Position", FieldKind::Text { min: 2, max: 100 }),
                FieldRule::optional(
                    "experience",
                    "Experience",
                    FieldKind::Number { min: 0, max: 50 },
                ),
                FieldRule::optional("message", "Message", FieldKind::Text { min: 10, max: 1000 }),
            ],
            message_field: "message",
            spam: SpamPolicy {
                max_http_refs: 1,
                keyword_denylist: false,
            },
            attachment_field: Some("resume"),
            subject_prefix: "Career Application",
            subject_field: "position",
            template: "career.html",
            plain_text_alt: false,
            required_message: "All required fields must be filled",
            spam_message: "Application appears to be spam",
            success_message: "Application submitted successfully!",
            failure_message: "Application could not be sent. Please try again later.",
            anchor: "application-form",
        }
    }

    /// The request-for-quotation form.
    pub fn rfq() -> Self {
        Self {
            kind: FormKind::Rfq,
            rules: vec![
                FieldRule::required("name", "Name", FieldKind::Name),
                FieldRule::required("email", "Email", FieldKind::Email),
                FieldRule::required("company", "Company", FieldKind::Text { min: 2, max: 100 }),
                FieldRule::required("service", "Service", FieldKind::Text { min: 2, max: 100 }),
                FieldRule::required("details", "Details", FieldKind::Text { min: 10, max: 2000 }),
            ],
            message_field: "details",
            spam: SpamPolicy {
                max_http_refs: 2,
                keyword_denylist: true,
            },
            attachment_field: None,
            subject_prefix: "RFQ Submission",
            subject_field: "service",
            template: "rfq.html",
            plain_text_alt: false,
            required_message: "All required fields must be filled",
            spam_message: "Your request appears to be spam",
            success_message: "Request submitted successfully!",
            failure_message: "Request could not be sent. Please try again later.",
            anchor: "rfq-section",
        }
    }
}
