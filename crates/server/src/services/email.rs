//! Notification rendering with Tera templates.
//!
//! Templates are embedded at compile time. Autoescaping covers
//! user-supplied text; free-text fields additionally pass through
//! `escape | linebreaksbr | safe` so newlines become line breaks.

use anyhow::{Context, Result};
use tera::Tera;

use crate::config::Config;
use crate::form::{FormEndpoint, FormKind, Submission};

use super::mailer::{OutboundAttachment, OutboundEmail};

/// Renders form submissions into outbound notifications.
pub struct EmailRenderer {
    tera: Tera,
}

impl EmailRenderer {
    /// Create a renderer with the embedded notification templates.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                "contact.html",
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/contact.html")),
            ),
            (
                "career.html",
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/career.html")),
            ),
            (
                "rfq.html",
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/rfq.html")),
            ),
        ])
        .context("failed to load email templates")?;

        Ok(Self { tera })
    }

    /// Render the notification for a validated submission.
    pub fn render(
        &self,
        endpoint: &FormEndpoint,
        submission: &Submission,
        config: &Config,
    ) -> Result<OutboundEmail> {
        let mut context = tera::Context::new();
        context.insert("site_name", &config.site_name);
        for rule in &endpoint.rules {
            context.insert(rule.name, submission.field(rule.name));
        }

        let html_body = self
            .tera
            .render(endpoint.template, &context)
            .with_context(|| format!("failed to render {}", endpoint.template))?;

        let subject = format!(
            "{} - {}",
            endpoint.subject_prefix,
            submission.field(endpoint.subject_field)
        );

        let text_body = endpoint
            .plain_text_alt
            .then(|| plain_text_body(endpoint.kind, submission));

        let attachment = submission.attachment().map(|att| OutboundAttachment {
            filename: att.filename.clone(),
            content_type: att.content_type.clone(),
            data: att.data.clone(),
        });

        Ok(OutboundEmail {
            to: config.notify_email.clone(),
            reply_to: Some((
                submission.field("email").to_string(),
                submission.field("name").to_string(),
            )),
            subject,
            html_body,
            text_body,
            attachment,
        })
    }
}

/// Plain-text alternative body. No escaping: this part is not markup.
fn plain_text_body(kind: FormKind, submission: &Submission) -> String {
    match kind {
        FormKind::Contact => format!(
            "Name: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}",
            submission.field("name"),
            submission.field("email"),
            submission.field("subject"),
            submission.field("message"),
        ),
        FormKind::Career | FormKind::Rfq => String::new(),
    }
}
