use std::path::PathBuf;
use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Body, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;

use crate::config::model::SmtpConfig;

/// Delivery failure kinds.
///
/// Every failure class carries its own variant so callers can tell an
/// authentication/network problem from a local attachment problem without
/// parsing log strings. None of these abort a batch; the orchestrator folds
/// them into a per-row result.
#[derive(Debug, Error)]
pub enum MailError {
    /// Recipient or sender address failed to parse.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// Attachment file could not be read.
    #[error("attachment error: {0}")]
    Attachment(String),

    /// Message assembly failed.
    #[error("failed to build message: {0}")]
    Build(String),

    /// SMTP session failure: connect, TLS, authentication, or submission.
    #[error("SMTP error: {0}")]
    Transport(String),
}

/// One artifact addressed to one recipient.
#[derive(Clone, Debug)]
pub struct OutgoingMail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Certificate image attached to the message.
    pub attachment: PathBuf,
}

/// Delivery seam: transmit one message to one recipient.
///
/// Implement this to provide an alternative backend; tests use a recording
/// fake in place of the SMTP channel.
pub trait Delivery {
    /// Send one message. Never panics; all failures come back as [`MailError`].
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// SMTP delivery over an authenticated implicit-TLS session.
///
/// The transport is built once per batch (TLS on connect, not STARTTLS, with
/// an explicit connection timeout) and reused across rows.
#[derive(Debug)]
pub struct SmtpChannel {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpChannel {
    /// Build a channel against the configured relay.
    ///
    /// Fails only on local problems (bad sender address, relay name
    /// resolution); network and authentication errors surface per-send.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let from: Mailbox = config
            .sender
            .parse()
            .map_err(|_| MailError::InvalidAddress(config.sender.clone()))?;

        let transport = SmtpTransport::relay(&config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.sender.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self { transport, from })
    }

    /// Assemble the multipart message: plain-text body plus one base64
    /// attachment carrying the artifact under its original filename.
    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, MailError> {
        let to: Mailbox = mail
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(mail.to.clone()))?;

        let bytes = std::fs::read(&mail.attachment).map_err(|e| {
            MailError::Attachment(format!("read '{}': {e}", mail.attachment.display()))
        })?;
        let filename = mail
            .attachment
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "certificate.png".to_owned());
        let content_type = ContentType::parse("image/png")
            .map_err(|e| MailError::Build(e.to_string()))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&mail.subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(mail.body.clone()))
                    .singlepart(Attachment::new(filename).body(Body::new(bytes), content_type)),
            )
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

impl Delivery for SmtpChannel {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = self.build_message(mail)?;
        self.transport
            .send(&message)
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mail/channel.rs"]
mod tests;
