//! Onboarding configuration
//!
//! Constructed once at startup and shared (`Arc<OnboardConfig>`) by every
//! component. The defaults are the production values.

use std::path::PathBuf;
use std::time::Duration;

use crate::prelude::*;
use onboard_email::ComposerSettings;

pub const DEFAULT_API_BASE_URL: &str = "https://api.lunarlanding.space";
pub const DEFAULT_FROM_NAME: &str = "Lunar Landing API Team";
pub const DEFAULT_SUPPORT_EMAIL: &str = "info@irisdatalabs.com";
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct OnboardConfig {
	/// Base URL of the API, interpolated into the welcome email
	pub api_base_url: String,
	/// Display name of the email sender
	pub from_name: String,
	pub support_email: String,
	pub columns: ColumnMap,
	/// Delay between two sends of a backfill sweep
	pub pacing: Duration,
	/// Directory with template overrides
	pub template_dir: Option<PathBuf>,
}

impl Default for OnboardConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_BASE_URL.into(),
			from_name: DEFAULT_FROM_NAME.into(),
			support_email: DEFAULT_SUPPORT_EMAIL.into(),
			columns: ColumnMap::default(),
			pacing: DEFAULT_PACING,
			template_dir: None,
		}
	}
}

impl OnboardConfig {
	pub fn builder() -> OnboardConfigBuilder {
		OnboardConfigBuilder::new()
	}

	pub fn composer_settings(&self) -> ComposerSettings {
		ComposerSettings {
			api_base_url: self.api_base_url.clone(),
			from_name: self.from_name.clone(),
			support_email: self.support_email.clone(),
		}
	}
}

pub struct OnboardConfigBuilder {
	config: OnboardConfig,
}

impl Default for OnboardConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl OnboardConfigBuilder {
	pub fn new() -> Self {
		Self { config: OnboardConfig::default() }
	}

	pub fn api_base_url(&mut self, api_base_url: impl Into<String>) -> &mut Self {
		self.config.api_base_url = api_base_url.into();
		self
	}
	pub fn from_name(&mut self, from_name: impl Into<String>) -> &mut Self {
		self.config.from_name = from_name.into();
		self
	}
	pub fn support_email(&mut self, support_email: impl Into<String>) -> &mut Self {
		self.config.support_email = support_email.into();
		self
	}
	pub fn columns(&mut self, columns: ColumnMap) -> &mut Self {
		self.config.columns = columns;
		self
	}
	pub fn pacing(&mut self, pacing: Duration) -> &mut Self {
		self.config.pacing = pacing;
		self
	}
	pub fn template_dir(&mut self, template_dir: impl Into<PathBuf>) -> &mut Self {
		self.config.template_dir = Some(template_dir.into());
		self
	}

	/// Validates and returns the configuration
	pub fn build(&self) -> ClResult<OnboardConfig> {
		let config = self.config.clone();

		if !(config.api_base_url.starts_with("https://") || config.api_base_url.starts_with("http://"))
		{
			return Err(Error::ConfigError(format!(
				"API base URL must be an http(s) URL: {}",
				config.api_base_url
			)));
		}
		if config.from_name.trim().is_empty() {
			return Err(Error::ConfigError("Sender display name must not be empty".into()));
		}

		let cols = &config.columns;
		if cols.api_key == cols.email_sent {
			return Err(Error::ConfigError("API key and email status columns must differ".into()));
		}
		if cols.api_key < cols.field_count() || cols.email_sent < cols.field_count() {
			return Err(Error::ConfigError(
				"Derived columns must come after the submission columns".into(),
			));
		}

		Ok(config)
	}
}


// vim: ts=4
