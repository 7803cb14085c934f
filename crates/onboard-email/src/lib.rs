//! Welcome email system with templates and SMTP integration
//!
//! This crate provides:
//! - Template rendering with variable substitution (Handlebars)
//! - Welcome email composition from a submission record and API key
//! - SMTP email sending with lettre, or log-only sending when unconfigured

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod composer;
pub mod sender;
pub mod settings;
pub mod template;

pub use composer::{ComposedEmail, ComposerSettings, WelcomeComposer};
pub use sender::{LogEmailSender, SmtpSender};
pub use settings::SmtpSettings;
pub use template::TemplateEngine;

mod prelude;

use onboard_types::email_adapter::EmailSender;
use std::sync::Arc;

/// Picks the SMTP sender when configured, otherwise the logging one
pub fn sender_from_settings(
	settings: Option<SmtpSettings>,
) -> onboard_types::error::ClResult<Arc<dyn EmailSender>> {
	match settings {
		Some(settings) => Ok(Arc::new(SmtpSender::new(settings)?)),
		None => {
			tracing::warn!("No SMTP host configured, emails will only be logged");
			Ok(Arc::new(LogEmailSender))
		}
	}
}

// vim: ts=4
