//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::careers::{self, JobPosting};
use crate::config::Config;
use crate::services::email::EmailRenderer;
use crate::services::mailer::{Mailer, SmtpMailer};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Application configuration.
    config: Config,

    /// Mail relay (available when SMTP_HOST is configured).
    mailer: Option<Arc<dyn Mailer>>,

    /// Notification template renderer.
    renderer: EmailRenderer,

    /// Careers catalog, immutable after startup.
    jobs: Vec<JobPosting>,
}

impl AppState {
    /// Initialize application state from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mailer: Option<Arc<dyn Mailer>> = match config.smtp_host.as_ref() {
            Some(host) => {
                let smtp = SmtpMailer::new(
                    host,
                    config.smtp_port,
                    config.smtp_username.as_deref(),
                    config.smtp_password.as_deref(),
                    &config.smtp_encryption,
                    Duration::from_secs(config.smtp_timeout_secs),
                    config.smtp_from_email.clone(),
                    config.site_name.clone(),
                )
                .context("failed to initialize SMTP mailer")?;
                info!(host = %host, port = config.smtp_port, "SMTP mail relay configured");
                Some(Arc::new(smtp) as Arc<dyn Mailer>)
            }
            None => {
                tracing::warn!("SMTP_HOST not set, form submissions will be logged, not relayed");
                None
            }
        };

        Self::build(config.clone(), mailer)
    }

    /// Initialize state with a caller-supplied mail relay (used by tests).
    pub fn with_mailer(config: &Config, mailer: Arc<dyn Mailer>) -> Result<Self> {
        Self::build(config.clone(), Some(mailer))
    }

    fn build(config: Config, mailer: Option<Arc<dyn Mailer>>) -> Result<Self> {
        let renderer = EmailRenderer::new().context("failed to initialize email renderer")?;
        let jobs = careers::load_catalog(&config.careers_file)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                mailer,
                renderer,
                jobs,
            }),
        })
    }

    /// Get the application configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the mail relay (if SMTP is configured).
    pub fn mailer(&self) -> Option<&Arc<dyn Mailer>> {
        self.inner.mailer.as_ref()
    }

    /// Get the notification renderer.
    pub fn renderer(&self) -> &EmailRenderer {
        &self.inner.renderer
    }

    /// Get the careers catalog.
    pub fn jobs(&self) -> &[JobPosting] {
        &self.inner.jobs
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("mailer", &self.inner.mailer.is_some())
            .field("jobs", &self.inner.jobs.len())
            .finish()
    }
}
