//! Template preview and test send with a sample user

use crate::keygen::TEST_KEY;
use crate::prelude::*;
use crate::processor::SubmissionProcessor;
use onboard_email::ComposedEmail;
use onboard_types::email_adapter::SendOutcome;
use onboard_types::types::DEFAULT_SOURCE;

pub fn sample_record(email: &str) -> SubmissionRecord {
	SubmissionRecord {
		timestamp: String::new(),
		email: email.to_string(),
		name: "Test User".into(),
		organization: "Test Organization".into(),
		role: "Developer".into(),
		use_case: "Testing the email system".into(),
		source: DEFAULT_SOURCE.into(),
	}
}

/// Renders the welcome email for the sample user without sending it
pub fn preview(processor: &SubmissionProcessor) -> ClResult<ComposedEmail> {
	processor.composer().compose(&sample_record("your-email@example.com"), TEST_KEY)
}

/// Sends the sample welcome email to `to`. Nothing is written to the sheet.
pub async fn send_test_email(processor: &SubmissionProcessor, to: &str) -> SendOutcome {
	info!("Sending test email to {}", to);

	let composed = match processor.composer().compose(&sample_record(to), TEST_KEY) {
		Ok(composed) => composed,
		Err(e) => return SendOutcome::Failed(e.to_string()),
	};
	let message = composed.into_message(to, &processor.config().from_name);

	let outcome = processor.sender().send(&message).await;
	match &outcome {
		SendOutcome::Sent => info!("Test email sent to {}", to),
		SendOutcome::Failed(reason) => warn!("Test email failed to send: {}", reason),
	}
	outcome
}

// vim: ts=4
