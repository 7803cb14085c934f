//! Welcome email composition
//!
//! Turns a submission record and its freshly issued API key into the subject
//! and bodies of the welcome message. Pure templating, no I/O beyond reading
//! template overrides.

use crate::prelude::*;
use crate::template::TemplateEngine;
use onboard_types::email_adapter::EmailMessage;

pub const WELCOME_TEMPLATE: &str = "welcome";

/// Greeting used when the submission carries no usable name
pub const FALLBACK_GREETING: &str = "there";

/// Fixed values interpolated into every welcome email
#[derive(Debug, Clone)]
pub struct ComposerSettings {
	pub api_base_url: String,
	pub from_name: String,
	pub support_email: String,
}

/// Rendered welcome email
#[derive(Debug, Clone)]
pub struct ComposedEmail {
	pub subject: String,
	pub html_body: String,
	pub text_body: String,
}

impl ComposedEmail {
	/// Addresses the composed email to `to`
	pub fn into_message(self, to: &str, from_name: &str) -> EmailMessage {
		EmailMessage {
			to: to.to_string(),
			subject: self.subject,
			html_body: self.html_body,
			text_body: self.text_body,
			from_name: from_name.to_string(),
		}
	}
}

pub struct WelcomeComposer {
	engine: TemplateEngine,
	settings: ComposerSettings,
}

impl WelcomeComposer {
	pub fn new(engine: TemplateEngine, settings: ComposerSettings) -> Self {
		Self { engine, settings }
	}

	pub fn settings(&self) -> &ComposerSettings {
		&self.settings
	}

	fn template_vars(&self, record: &SubmissionRecord, api_key: &str) -> serde_json::Value {
		serde_json::json!({
			"greeting_name": record.first_name().unwrap_or(FALLBACK_GREETING),
			"email": record.email,
			"organization": record.organization,
			"role": record.role,
			"use_case": record.use_case,
			"source": record.source,
			"api_key": api_key,
			"api_base_url": self.settings.api_base_url.trim_end_matches('/'),
			"from_name": self.settings.from_name,
			"support_email": self.settings.support_email,
		})
	}

	pub fn compose(&self, record: &SubmissionRecord, api_key: &str) -> ClResult<ComposedEmail> {
		let vars = self.template_vars(record, api_key);
		let rendered = self.engine.render(WELCOME_TEMPLATE, &vars)?;

		let subject = rendered.subject.ok_or_else(|| {
			Error::ConfigError(format!(
				"Template '{}' has no subject in frontmatter",
				WELCOME_TEMPLATE
			))
		})?;

		Ok(ComposedEmail { subject, html_body: rendered.html_body, text_body: rendered.text_body })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use onboard_types::types::ColumnMap;

	fn composer() -> WelcomeComposer {
		WelcomeComposer::new(
			TemplateEngine::new(None),
			ComposerSettings {
				api_base_url: "https://api.example.test/".to_string(),
				from_name: "Example Team".to_string(),
				support_email: "help@example.test".to_string(),
			},
		)
	}

	fn record(values: &[&str]) -> SubmissionRecord {
		let values: Vec<String> = values.iter().map(ToString::to_string).collect();
		SubmissionRecord::from_values(&values, &ColumnMap::default())
	}

	#[test]
	fn test_greeting_uses_first_name() {
		let email = composer()
			.compose(&record(&["t", "a@x.com", "Ana Lopez", "", "Researcher"]), "ldp_live_abc")
			.unwrap();

		assert!(email.html_body.contains("Hi Ana,"));
		assert!(!email.html_body.contains("Hi Ana Lopez,"));
		assert!(email.text_body.contains("Hi Ana,"));
	}

	#[test]
	fn test_empty_name_falls_back() {
		let email = composer().compose(&record(&["t", "a@x.com", ""]), "ldp_live_abc").unwrap();
		assert!(email.html_body.contains("Hi there,"));
	}

	#[test]
	fn test_key_and_base_url_interpolated() {
		let key = "ldp_live_0123456789abcdef0123456789abcdef";
		let email = composer().compose(&record(&["t", "a@x.com", "Bo"]), key).unwrap();

		assert!(email.subject.contains("Welcome to Lunar Landing API Beta"));
		assert!(email.html_body.contains(&format!("<div class=\"api-key\">{}</div>", key)));
		assert!(email.html_body.contains(&format!("\"X-API-Key\": \"{}\"", key)));
		assert!(email.html_body.contains("https://api.example.test/api/v1/recommendations"));
		assert!(email.html_body.contains("https://api.example.test/docs/tutorial"));
		assert!(email.html_body.contains("Treat your API key like a password"));
		assert!(email.html_body.contains("Example Team"));
		assert!(email.html_body.contains("help@example.test"));
	}

	#[test]
	fn test_defaults_rendered() {
		let email = composer().compose(&record(&["t", "a@x.com", "Cy", "", "", "", ""]), "k").unwrap();

		assert!(email.html_body.contains("Independent"));
		assert!(email.html_body.contains("Not specified"));
		assert!(!email.html_body.contains("<strong>Role:</strong>"));
	}

	#[test]
	fn test_user_values_are_escaped() {
		let email =
			composer().compose(&record(&["t", "a@x.com", "<b>Eve</b>", "Acme <script>"]), "k").unwrap();

		assert!(!email.html_body.contains("<script>"));
		assert!(email.html_body.contains("Acme &lt;script&gt;"));
		assert!(email.text_body.contains("Acme <script>"));
	}

	#[test]
	fn test_into_message() {
		let msg = composer()
			.compose(&record(&["t", "a@x.com", "Di"]), "k")
			.unwrap()
			.into_message("a@x.com", "Example Team");
		assert_eq!(msg.to, "a@x.com");
		assert_eq!(msg.from_name, "Example Team");
	}
}

// vim: ts=4
