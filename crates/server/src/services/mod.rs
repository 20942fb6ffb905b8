//! Outbound services.

pub mod email;
pub mod mailer;

pub use email::EmailRenderer;
pub use mailer::{Mailer, OutboundEmail, SmtpMailer};
