//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Directory holding the static site pages and assets (default: ./site).
    pub site_dir: PathBuf,

    /// Path to the careers catalog YAML file (default: ./careers.yml).
    pub careers_file: PathBuf,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Cookie SameSite policy: "strict", "lax", or "none" (default: "strict").
    pub cookie_same_site: String,

    /// SMTP host for email delivery. When None, submissions are logged
    /// instead of relayed.
    pub smtp_host: Option<String>,

    /// SMTP port (default: 587).
    pub smtp_port: u16,

    /// SMTP username for authentication.
    pub smtp_username: Option<String>,

    /// SMTP password for authentication. Credentials are only ever read from
    /// the environment; nothing in the repository may carry them.
    pub smtp_password: Option<String>,

    /// SMTP encryption mode: "starttls" (default), "tls", or "none".
    pub smtp_encryption: String,

    /// SMTP send timeout in seconds (default: 20).
    pub smtp_timeout_secs: u64,

    /// From address for outgoing notifications.
    pub smtp_from_email: String,

    /// Destination address for form submission notifications.
    pub notify_email: String,

    /// Site name used in email templates and the From header.
    pub site_name: String,

    /// Redirect target after a successful submission (default: /thank-you.html).
    pub thank_you_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let site_dir = env::var("SITE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./site"));

        let careers_file = env::var("CAREERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./careers.yml"));

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let cookie_same_site = env::var("COOKIE_SAME_SITE")
            .unwrap_or_else(|_| "strict".to_string())
            .to_lowercase();

        let smtp_host = env::var("SMTP_HOST").ok();

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .context("SMTP_PORT must be a valid u16")?;

        let smtp_username = env::var("SMTP_USERNAME").ok();
        let smtp_password = env::var("SMTP_PASSWORD").ok();

        let smtp_encryption = env::var("SMTP_ENCRYPTION")
            .unwrap_or_else(|_| "starttls".to_string())
            .to_lowercase();

        let smtp_timeout_secs = env::var("SMTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .context("SMTP_TIMEOUT_SECS must be a valid u64")?;

        let smtp_from_email =
            env::var("SMTP_FROM_EMAIL").unwrap_or_else(|_| "noreply@localhost".to_string());

        let notify_email =
            env::var("NOTIFY_EMAIL").unwrap_or_else(|_| "webmaster@localhost".to_string());

        let site_name = env::var("SITE_NAME").unwrap_or_else(|_| "Quayside".to_string());

        let thank_you_url =
            env::var("THANK_YOU_URL").unwrap_or_else(|_| "/thank-you.html".to_string());

        Ok(Self {
            port,
            site_dir,
            careers_file,
            cors_allowed_origins,
            cookie_same_site,
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            smtp_encryption,
            smtp_timeout_secs,
            smtp_from_email,
            notify_email,
            site_name,
            thank_you_url,
        })
    }
}
