//! Mail delivery over SMTP using lettre.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// A composed notification ready for delivery.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,

    /// Visitor address and display name, set as Reply-To.
    pub reply_to: Option<(String, String)>,

    pub subject: String,
    pub html_body: String,

    /// Plain-text alternative, when the endpoint renders one.
    pub text_body: Option<String>,

    pub attachment: Option<OutboundAttachment>,
}

/// File attached to an outbound notification.
#[derive(Debug, Clone)]
pub struct OutboundAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Mail relay seam. The production implementation speaks SMTP; tests
/// substitute recording or failing relays.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message. Errors carry transport detail and must only be
    /// logged, never echoed to clients.
    async fn send(&self, email: OutboundEmail) -> Result<()>;
}

/// SMTP relay via lettre.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_email: String,
    from_name: String,
}

impl SmtpMailer {
    /// Create a new SMTP mailer.
    ///
    /// `encryption` controls the transport mode:
    /// - `"starttls"` (default): Opportunistic STARTTLS on port 587
    /// - `"tls"`: Implicit TLS (SMTPS) on port 465
    /// - `"none"`: Unencrypted (for local dev only)
    pub fn new(
        smtp_host: &str,
        smtp_port: u16,
        smtp_username: Option<&str>,
        smtp_password: Option<&str>,
        encryption: &str,
        timeout: Duration,
        from_email: String,
        from_name: String,
    ) -> Result<Self> {
        let mut builder = match encryption {
            "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_host)
                .context("failed to create SMTP relay transport")?
                .port(smtp_port),
            "none" => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(smtp_host).port(smtp_port)
            }
            _ => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_host)
                .context("failed to create SMTP STARTTLS transport")?
                .port(smtp_port),
        };

        if let (Some(user), Some(pass)) = (smtp_username, smtp_password) {
            builder = builder.credentials(Credentials::new(user.to_string(), pass.to_string()));
        }

        // The relay call otherwise blocks until the peer's own socket
        // timeout fires.
        let transport = builder.timeout(Some(timeout)).build();

        Ok(Self {
            transport,
            from_email,
            from_name,
        })
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message> {
        let from_address: Address = self
            .from_email
            .parse()
            .context("invalid from email address")?;

        let mut builder = Message::builder()
            .from(Mailbox::new(Some(self.from_name.clone()), from_address))
            .to(email.to.parse().context("invalid recipient email address")?)
            .subject(email.subject.clone());

        if let Some((address, name)) = &email.reply_to {
            let reply_address: Address =
                address.parse().context("invalid reply-to email address")?;
            builder = builder.reply_to(Mailbox::new(Some(name.clone()), reply_address));
        }

        let content = match &email.text_body {
            Some(text) => {
                MultiPart::alternative_plain_html(text.clone(), email.html_body.clone())
            }
            None => MultiPart::alternative().singlepart(SinglePart::html(email.html_body.clone())),
        };

        let message = match &email.attachment {
            Some(att) => {
                let content_type = ContentType::parse(&att.content_type)
                    .context("invalid attachment content type")?;
                let part = Attachment::new(att.filename.clone()).body(att.data.clone(), content_type);
                builder
                    .multipart(MultiPart::mixed().multipart(content).singlepart(part))
                    .context("failed to build email message")?
            }
            None => builder
                .multipart(content)
                .context("failed to build email message")?,
        };

        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutboundEmail) -> Result<()> {
        let message = self.build_message(&email)?;

        self.transport
            .send(message)
            .await
            .context("failed to send email")?;

        Ok(())
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn mailer(encryption: &str, port: u16) -> Result<SmtpMailer> {
        SmtpMailer::new(
            "nonexistent.invalid",
            port,
            None,
            None,
            encryption,
            Duration::from_secs(5),
            "noreply@example.com".to_string(),
            "Quayside".to_string(),
        )
    }

    #[test]
    fn construction_is_lazy_for_all_modes() {
        // No connection is made at build time
        assert!(mailer("starttls", 587).is_ok());
        assert!(mailer("tls", 465).is_ok());
        assert!(mailer("none", 25).is_ok());
    }

    #[test]
    fn message_carries_reply_to_and_alternative() {
        let m = mailer("none", 25).unwrap();
        let email = OutboundEmail {
            to: "inbox@example.com".to_string(),
            reply_to: Some(("visitor@example.com".to_string(), "A Visitor".to_string())),
            subject: "Contact Form Submission - Hello".to_string(),
            html_body: "<p>Hi</p>".to_string(),
            text_body: Some("Hi".to_string()),
            attachment: None,
        };

        let message = m.build_message(&email).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("Reply-To"));
        assert!(rendered.contains("visitor@example.com"));
        assert!(rendered.contains("multipart/alternative"));
    }

    #[test]
    fn attachment_produces_mixed_multipart() {
        let m = mailer("none", 25).unwrap();
        let email = OutboundEmail {
            to: "inbox@example.com".to_string(),
            reply_to: None,
            subject: "Career Application - Engineer".to_string(),
            html_body: "<p>Application</p>".to_string(),
            text_body: None,
            attachment: Some(OutboundAttachment {
                filename: "resume.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                data: b"%PDF-1.7".to_vec(),
            }),
        };

        let message = m.build_message(&email).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("multipart/mixed"));
        assert!(rendered.contains("resume.pdf"));
    }

    #[test]
    fn bad_recipient_is_an_error() {
        let m = mailer("none", 25).unwrap();
        let email = OutboundEmail {
            to: "not an address".to_string(),
            reply_to: None,
            subject: "x".to_string(),
            html_body: String::new(),
            text_body: None,
            attachment: None,
        };
        assert!(m.build_message(&email).is_err());
    }
}
