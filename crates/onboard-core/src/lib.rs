//! Beta onboarding workflow
//!
//! On every form submission a unique API key is issued, stored next to the
//! submission, and mailed to the user in a welcome email. Operators can also
//! set up the sheet headers, preview or test the email, and backfill keys for
//! submissions that predate the automation.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod backfill;
pub mod config;
pub mod keygen;
pub mod preview;
pub mod processor;
pub mod setup;

mod prelude;

pub use backfill::{BackfillReport, BackfillRunner};
pub use config::{OnboardConfig, OnboardConfigBuilder};
pub use processor::SubmissionProcessor;
pub use setup::SchemaReport;

use std::sync::Arc;

use crate::prelude::*;
use onboard_email::ComposedEmail;
use onboard_types::email_adapter::{EmailSender, SendOutcome};
use onboard_types::sheet_adapter::SheetAdapter;
use onboard_types::types::SubmissionEvent;

/// Entry points of the onboarding service, sharing one configuration and
/// one pair of storage and mail adapters
#[derive(Debug, Clone)]
pub struct Onboarding {
	processor: SubmissionProcessor,
}

impl Onboarding {
	pub fn new(
		config: OnboardConfig,
		sheet: Arc<dyn SheetAdapter>,
		sender: Arc<dyn EmailSender>,
	) -> Self {
		Self { processor: SubmissionProcessor::new(Arc::new(config), sheet, sender) }
	}

	pub fn processor(&self) -> &SubmissionProcessor {
		&self.processor
	}

	/// Handles a "submission created" event, see [`SubmissionProcessor::handle_submission`]
	pub async fn handle_submission(&self, event: &SubmissionEvent) -> Option<RowOutcome> {
		self.processor.handle_submission(event).await
	}

	pub async fn process_stored_row(&self, row: u32) -> ClResult<RowOutcome> {
		self.processor.process_stored_row(row).await
	}

	pub async fn run_backfill(&self) -> ClResult<BackfillReport> {
		BackfillRunner::new(self.processor.clone()).run_backfill().await
	}

	pub async fn ensure_schema(&self) -> ClResult<SchemaReport> {
		setup::ensure_schema(self.processor.sheet().as_ref(), &self.processor.config().columns)
			.await
	}

	pub fn preview(&self) -> ClResult<ComposedEmail> {
		preview::preview(&self.processor)
	}

	pub async fn send_test_email(&self, to: &str) -> SendOutcome {
		preview::send_test_email(&self.processor, to).await
	}
}

// vim: ts=4
