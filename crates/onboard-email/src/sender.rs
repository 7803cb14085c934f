//! Email senders
//!
//! `SmtpSender` delivers through an SMTP relay using lettre, `LogEmailSender`
//! only logs the message and is used when no SMTP host is configured.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

use crate::prelude::*;
use crate::settings::{SmtpSettings, TlsMode};
use onboard_types::email_adapter::{EmailMessage, EmailSender, SendOutcome};

/// SMTP email sender
pub struct SmtpSender {
	transport: AsyncSmtpTransport<Tokio1Executor>,
	from_address: Address,
}

impl std::fmt::Debug for SmtpSender {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SmtpSender").field("from_address", &self.from_address).finish_non_exhaustive()
	}
}

impl SmtpSender {
	/// Create new SMTP sender. The connection is opened lazily on the first send.
	pub fn new(settings: SmtpSettings) -> ClResult<Self> {
		settings.validate()?;
		let from_address: Address = settings
			.from_address
			.parse()
			.map_err(|_| Error::ConfigError("Invalid from email format".into()))?;

		let tls = match settings.tls_mode {
			TlsMode::Tls => {
				debug!("Using TLS mode");
				Tls::Wrapper(
					TlsParameters::builder(settings.host.clone())
						.build()
						.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
				)
			}
			TlsMode::StartTls => {
				debug!("Using STARTTLS mode");
				Tls::Opportunistic(
					TlsParameters::builder(settings.host.clone())
						.build()
						.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
				)
			}
			TlsMode::None => {
				debug!("No TLS mode");
				Tls::None
			}
		};

		let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
			.port(settings.port)
			.timeout(Some(Duration::from_secs(settings.timeout_seconds)))
			.tls(tls);

		if let (Some(username), Some(password)) = (settings.username, settings.password) {
			builder = builder.credentials(Credentials::new(username, password));
		}

		info!("SMTP sender configured for {}:{}", settings.host, settings.port);
		Ok(Self { transport: builder.build(), from_address })
	}

	/// Build a multipart (plain + HTML) lettre message
	fn build_message(&self, message: &EmailMessage) -> ClResult<Message> {
		// Validate recipient before lettre does, for a clearer reason
		if !message.to.contains('@') {
			return Err(Error::ValidationError("Invalid recipient email address".into()));
		}

		let to: Mailbox = message
			.to
			.parse()
			.map_err(|_| Error::ValidationError("Invalid recipient email format".into()))?;
		let from = Mailbox::new(Some(message.from_name.clone()), self.from_address.clone());

		Message::builder()
			.from(from)
			.to(to)
			.subject(&message.subject)
			.multipart(MultiPart::alternative_plain_html(
				message.text_body.clone(),
				message.html_body.clone(),
			))
			.map_err(|e| Error::ValidationError(format!("Failed to build email: {}", e)))
	}
}

#[async_trait]
impl EmailSender for SmtpSender {
	async fn send(&self, message: &EmailMessage) -> SendOutcome {
		let email = match self.build_message(message) {
			Ok(email) => email,
			Err(e) => {
				warn!("Cannot send email to {}: {}", message.to, e);
				return SendOutcome::Failed(e.to_string());
			}
		};

		match self.transport.send(email).await {
			Ok(response) => {
				info!("Email sent successfully to {} (response: {:?})", message.to, response.code());
				SendOutcome::Sent
			}
			Err(e) => {
				warn!("Failed to send email to {}: {}", message.to, e);
				SendOutcome::Failed(format!("SMTP send failed: {}", e))
			}
		}
	}
}

/// Sender that only logs, used when email delivery is not configured
#[derive(Debug, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
	async fn send(&self, message: &EmailMessage) -> SendOutcome {
		info!(
			"Email sending disabled, logging message to {} (subject: {}, {} bytes html)",
			message.to,
			message.subject,
			message.html_body.len()
		);
		debug!("Text body:\n{}", message.text_body);
		SendOutcome::Sent
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn settings() -> SmtpSettings {
		SmtpSettings {
			host: "localhost".into(),
			port: 2525,
			username: None,
			password: None,
			from_address: "beta@example.com".into(),
			tls_mode: TlsMode::None,
			timeout_seconds: 1,
		}
	}

	fn message(to: &str) -> EmailMessage {
		EmailMessage {
			to: to.to_string(),
			subject: "Test Email".to_string(),
			html_body: "<p>This is a test</p>".to_string(),
			text_body: "This is a test".to_string(),
			from_name: "Lunar Landing API Team".to_string(),
		}
	}

	#[tokio::test]
	async fn test_invalid_from_address() {
		let mut settings = settings();
		settings.from_address = "not-an-address".into();
		assert!(SmtpSender::new(settings).is_err());
	}

	#[tokio::test]
	async fn test_build_message() {
		let sender = SmtpSender::new(settings()).unwrap();
		let email = sender.build_message(&message("user@example.com")).unwrap();
		let raw = String::from_utf8_lossy(&email.formatted()).to_string();

		assert!(raw.contains("Lunar Landing API Team"));
		assert!(raw.contains("beta@example.com"));
		assert!(raw.contains("multipart/alternative"));
	}

	#[tokio::test]
	async fn test_invalid_recipient_is_a_failed_outcome() {
		let sender = SmtpSender::new(settings()).unwrap();
		let outcome = sender.send(&message("userexample.com")).await;
		assert!(matches!(outcome, SendOutcome::Failed(_)));
	}

	#[tokio::test]
	async fn test_log_sender_reports_sent() {
		assert!(LogEmailSender.send(&message("user@example.com")).await.is_sent());
	}
}

// vim: ts=4
