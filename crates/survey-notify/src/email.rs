//! SMTP delivery of the digest with report attachments.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use survey_model::KpiResult;

use crate::Notifier;
use crate::digest::EmailDigest;
use crate::error::{NotifyError, Result};

/// Environment variable holding the SMTP user name.
pub const USER_ENV: &str = "REPORT_SMTP_USER";
/// Environment variable holding the SMTP password.
pub const PASS_ENV: &str = "REPORT_SMTP_PASS";

const SMTP_TIMEOUT: Duration = Duration::from_secs(20);

fn default_smtp_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

fn default_subject_prefix() -> String {
    "[Weekly Report]".to_string()
}

/// Email delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default = "default_true")]
    pub use_starttls: bool,
    #[serde(default)]
    pub from_addr: String,
    #[serde(default)]
    pub to_addrs: Vec<String>,
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            use_starttls: true,
            from_addr: String::new(),
            to_addrs: Vec::new(),
            subject_prefix: default_subject_prefix(),
        }
    }
}

fn mailbox(address: &str) -> Result<Mailbox> {
    address
        .trim()
        .parse()
        .map_err(|source| NotifyError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

fn credential(name: &'static str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(NotifyError::MissingCredential(name))
}

fn attachment_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Sends the digest over SMTP.
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    config: EmailConfig,
    credentials: Option<(String, String)>,
}

impl EmailNotifier {
    /// Credentials are read from [`USER_ENV`] and [`PASS_ENV`] at send time.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            credentials: None,
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.credentials = Some((user.into(), pass.into()));
        self
    }

    fn credentials(&self) -> Result<Credentials> {
        let (user, pass) = match &self.credentials {
            Some((user, pass)) => (user.clone(), pass.clone()),
            None => (credential(USER_ENV)?, credential(PASS_ENV)?),
        };
        Ok(Credentials::new(user, pass))
    }

    /// Builds the message. Attachment paths that no longer exist are skipped.
    pub fn build_message(&self, kpis: &KpiResult, attachments: &[PathBuf]) -> Result<Message> {
        if self.config.to_addrs.is_empty() {
            return Err(NotifyError::NoRecipients);
        }
        let digest = EmailDigest::compose(&self.config.subject_prefix, kpis);
        let mut builder = Message::builder()
            .from(mailbox(&self.config.from_addr)?)
            .subject(digest.subject);
        for to in &self.config.to_addrs {
            builder = builder.to(mailbox(to)?);
        }

        let octet_stream = ContentType::parse("application/octet-stream")?;
        let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(digest.body));
        for path in attachments {
            if !path.exists() {
                debug!(path = %path.display(), "attachment missing, skipped");
                continue;
            }
            let bytes = fs::read(path).map_err(|source| NotifyError::Attachment {
                path: path.clone(),
                source,
            })?;
            parts = parts.singlepart(
                Attachment::new(attachment_name(path)).body(bytes, octet_stream.clone()),
            );
        }
        Ok(builder.multipart(parts)?)
    }

    fn transport(&self, credentials: Credentials) -> Result<SmtpTransport> {
        let builder = if self.config.use_starttls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        };
        Ok(builder
            .port(self.config.smtp_port)
            .credentials(credentials)
            .timeout(Some(SMTP_TIMEOUT))
            .build())
    }
}

impl Notifier for EmailNotifier {
    fn send(&self, kpis: &KpiResult, attachments: &[PathBuf], dry_run: bool) -> Result<()> {
        if !self.config.enabled {
            info!("email disabled in config, skipping send");
            return Ok(());
        }
        let credentials = self.credentials()?;
        let message = self.build_message(kpis, attachments)?;

        if dry_run {
            info!(
                to = ?self.config.to_addrs,
                attachments = attachments.len(),
                "dry run: would send email"
            );
            return Ok(());
        }

        info!(
            to = ?self.config.to_addrs,
            host = %self.config.smtp_host,
            port = self.config.smtp_port,
            "sending email"
        );
        self.transport(credentials)?.send(&message)?;
        info!("email sent");
        Ok(())
    }
}
