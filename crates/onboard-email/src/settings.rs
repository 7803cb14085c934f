//! SMTP settings
//!
//! Filled in by the binary from its command line. Without an SMTP host no
//! SMTP sender is configured and emails are only logged.

use crate::prelude::*;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
	None,
	#[default]
	StartTls,
	Tls,
}

impl FromStr for TlsMode {
	type Err = Error;

	fn from_str(s: &str) -> ClResult<Self> {
		match s {
			"none" => Ok(TlsMode::None),
			"starttls" => Ok(TlsMode::StartTls),
			"tls" => Ok(TlsMode::Tls),
			_ => Err(Error::ConfigError(format!(
				"Invalid TLS mode: {}. Must be 'none', 'starttls', or 'tls'",
				s
			))),
		}
	}
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
	/// SMTP server hostname (e.g., smtp.gmail.com)
	pub host: String,
	/// SMTP server port (typically 25, 465, or 587)
	pub port: u16,
	pub username: Option<String>,
	pub password: Option<String>,
	/// Email sender address (e.g., beta@lunarlanding.space)
	pub from_address: String,
	pub tls_mode: TlsMode,
	pub timeout_seconds: u64,
}

impl SmtpSettings {
	pub const DEFAULT_PORT: u16 = 587;
	pub const DEFAULT_TIMEOUT: u64 = 30;

	/// Settings with the default port, TLS mode and timeout, without credentials
	pub fn new(host: impl Into<String>, from_address: impl Into<String>) -> Self {
		Self {
			host: host.into(),
			port: Self::DEFAULT_PORT,
			username: None,
			password: None,
			from_address: from_address.into(),
			tls_mode: TlsMode::default(),
			timeout_seconds: Self::DEFAULT_TIMEOUT,
		}
	}

	/// Checks the values a transport cannot be built from
	pub fn validate(&self) -> ClResult<()> {
		if self.host.trim().is_empty() {
			return Err(Error::ConfigError("SMTP host must not be empty".into()));
		}
		if self.port == 0 {
			return Err(Error::ConfigError("SMTP port must be between 1 and 65535".into()));
		}
		if !self.from_address.contains('@') {
			return Err(Error::ConfigError("Invalid SMTP sender address".into()));
		}
		if self.username.is_some() != self.password.is_some() {
			return Err(Error::ConfigError("SMTP username and password go together".into()));
		}
		Ok(())
	}
}


// vim: ts=4
