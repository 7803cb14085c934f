//! Command line interface
//!
//! Every deployment setting can be given as a flag or through its environment
//! variable, the flag taking precedence.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::prelude::*;
use onboard_core::OnboardConfig;
use onboard_core::config::{DEFAULT_API_BASE_URL, DEFAULT_FROM_NAME};
use onboard_email::SmtpSettings;
use onboard_email::settings::TlsMode;

#[derive(Parser, Debug)]
#[command(name = "lunar-onboard", version, about = "Lunar Landing API beta onboarding")]
pub struct Cli {
	/// SQLite database holding the submission sheet
	#[arg(long, env = "SHEET_DB", default_value = "./data/sheet.db", global = true)]
	pub sheet_db: PathBuf,

	/// Directory with welcome email template overrides
	#[arg(long, env = "ONBOARD_TEMPLATE_DIR", value_name = "DIR", global = true)]
	pub template_dir: Option<PathBuf>,

	/// Delay between two sends of a backfill, in milliseconds
	#[arg(long, env = "ONBOARD_PACING_MS", default_value_t = 1000, global = true)]
	pub pacing_ms: u64,

	/// API base URL shown in the welcome email
	#[arg(long, env = "ONBOARD_API_BASE_URL", default_value = DEFAULT_API_BASE_URL, global = true)]
	pub api_base_url: String,

	/// Display name of the email sender
	#[arg(long, env = "ONBOARD_FROM_NAME", default_value = DEFAULT_FROM_NAME, global = true)]
	pub from_name: String,

	#[command(flatten)]
	pub smtp: SmtpArgs,

	#[command(subcommand)]
	pub command: Command,
}

/// SMTP relay settings. Without a host emails are only logged.
#[derive(Args, Debug, Clone)]
pub struct SmtpArgs {
	/// SMTP server hostname
	#[arg(long = "smtp-host", env = "SMTP_HOST", global = true)]
	pub host: Option<String>,

	#[arg(
		long = "smtp-port",
		env = "SMTP_PORT",
		default_value_t = SmtpSettings::DEFAULT_PORT,
		value_parser = clap::value_parser!(u16).range(1..),
		global = true
	)]
	pub port: u16,

	#[arg(long = "smtp-username", env = "SMTP_USERNAME", global = true)]
	pub username: Option<String>,

	#[arg(long = "smtp-password", env = "SMTP_PASSWORD", hide_env_values = true, global = true)]
	pub password: Option<String>,

	/// Sender address of the welcome emails
	#[arg(long = "smtp-from", env = "SMTP_FROM", value_name = "ADDRESS", global = true)]
	pub from_address: Option<String>,

	/// Transport security: none, starttls or tls
	#[arg(long = "smtp-tls", env = "SMTP_TLS", default_value = "starttls", global = true)]
	pub tls: String,

	/// Connection timeout in seconds
	#[arg(
		long = "smtp-timeout",
		env = "SMTP_TIMEOUT",
		default_value_t = SmtpSettings::DEFAULT_TIMEOUT,
		global = true
	)]
	pub timeout_seconds: u64,
}

impl SmtpArgs {
	/// SMTP settings, `None` when no host is given
	pub fn settings(&self) -> ClResult<Option<SmtpSettings>> {
		let Some(host) = self.host.as_deref().filter(|h| !h.trim().is_empty()) else {
			return Ok(None);
		};
		let from_address = self.from_address.clone().ok_or_else(|| {
			Error::ConfigError("An SMTP sender address is required with the SMTP host".into())
		})?;

		let settings = SmtpSettings {
			port: self.port,
			username: self.username.clone(),
			password: self.password.clone(),
			tls_mode: self.tls.parse::<TlsMode>()?,
			timeout_seconds: self.timeout_seconds,
			..SmtpSettings::new(host, from_address)
		};
		settings.validate()?;
		Ok(Some(settings))
	}
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Add the "API Key" and "Email Sent" column headers
	Setup,

	/// Send the welcome email with a sample key to an address
	TestEmail {
		/// Recipient address
		to: String,
	},

	/// Render the welcome email for a sample user
	Preview {
		/// Print the HTML body instead of the plain text one
		#[arg(long, default_value_t = false)]
		html: bool,
	},

	/// Issue keys and send emails for every row that has no key yet
	Backfill,

	/// Run the onboarding of a single submission
	Submit {
		/// Existing row to process. Without it the values are appended first.
		#[arg(long)]
		row: Option<u32>,

		/// Field values in column order (timestamp, email, name, organization, role, use case, source)
		values: Vec<String>,
	},

	/// Serve the submission webhook
	Serve {
		/// Address to listen on
		#[arg(long, env = "LISTEN", default_value = "127.0.0.1:8080")]
		listen: String,
	},
}

impl Cli {
	pub fn onboard_config(&self) -> ClResult<OnboardConfig> {
		let mut builder = OnboardConfig::builder();
		builder
			.api_base_url(self.api_base_url.as_str())
			.from_name(self.from_name.as_str())
			.pacing(Duration::from_millis(self.pacing_ms));
		if let Some(dir) = &self.template_dir {
			builder.template_dir(dir.clone());
		}
		builder.build()
	}
}


// vim: ts=4
