//! Per-row onboarding transition
//!
//! A row moves `NEW → KEY_ISSUED → EMAIL_ATTEMPTED → DONE` in one pass:
//! 1. a non-empty API key cell (whitespace included) means the row is done, nothing is written or sent
//! 2. a fresh key is written to the API key cell
//! 3. the welcome email is composed and handed to the sender
//! 4. the real outcome of that attempt is written to the email status cell
//!
//! The key write completes before the email is attempted, so a crash between
//! the two leaves a row that will never be keyed or emailed twice.

use std::sync::Arc;

use crate::config::OnboardConfig;
use crate::keygen;
use crate::prelude::*;
use onboard_email::{TemplateEngine, WelcomeComposer};
use onboard_types::email_adapter::{EmailSender, SendOutcome};
use onboard_types::sheet_adapter::SheetAdapter;
use onboard_types::types::SubmissionEvent;

/// First data row, row 1 holds the headers
pub const FIRST_DATA_ROW: u32 = 2;

#[derive(Clone)]
pub struct SubmissionProcessor {
	config: Arc<OnboardConfig>,
	sheet: Arc<dyn SheetAdapter>,
	sender: Arc<dyn EmailSender>,
	composer: Arc<WelcomeComposer>,
}

impl std::fmt::Debug for SubmissionProcessor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SubmissionProcessor")
			.field("sheet", &self.sheet)
			.field("sender", &self.sender)
			.finish_non_exhaustive()
	}
}

impl SubmissionProcessor {
	pub fn new(
		config: Arc<OnboardConfig>,
		sheet: Arc<dyn SheetAdapter>,
		sender: Arc<dyn EmailSender>,
	) -> Self {
		let engine = TemplateEngine::new(config.template_dir.clone());
		let composer = Arc::new(WelcomeComposer::new(engine, config.composer_settings()));
		Self { config, sheet, sender, composer }
	}

	pub fn config(&self) -> &OnboardConfig {
		&self.config
	}

	pub fn sheet(&self) -> &Arc<dyn SheetAdapter> {
		&self.sheet
	}

	pub fn sender(&self) -> &Arc<dyn EmailSender> {
		&self.sender
	}

	pub fn composer(&self) -> &WelcomeComposer {
		&self.composer
	}

	/// Event entry point. Errors are logged and never reach the caller.
	pub async fn handle_submission(&self, event: &SubmissionEvent) -> Option<RowOutcome> {
		info!("Form submission received (row: {:?})", event.row);

		match self.try_handle_submission(event).await {
			Ok(outcome) => Some(outcome),
			Err(e) => {
				error!("Error handling submission (row: {:?}): {}", event.row, e);
				None
			}
		}
	}

	async fn try_handle_submission(&self, event: &SubmissionEvent) -> ClResult<RowOutcome> {
		let row = match event.row {
			Some(row) => {
				self.check_data_row(row).await?;
				row
			}
			None => {
				if self.sheet.row_count().await? == 0 {
					return Err(Error::ValidationError(
						"sheet has no header row, run setup first".into(),
					));
				}
				let row = self.sheet.append_row(&event.values).await?;
				if row < FIRST_DATA_ROW {
					return Err(Error::ValidationError(format!("row {} is not a data row", row)));
				}
				debug!("Submission appended as row {}", row);
				row
			}
		};

		let record = SubmissionRecord::from_values(&event.values, &self.config.columns);
		info!("New beta user: {} (row {})", record.email, row);
		self.process_row(row, &record).await
	}

	/// Reads the submission stored in `row` and runs the transition on it
	pub async fn process_stored_row(&self, row: u32) -> ClResult<RowOutcome> {
		self.check_data_row(row).await?;

		let width = u32::try_from(self.config.columns.field_count()).map_err(|_| Error::Parse)?;
		let values = self.sheet.read_row(row, width).await?;
		let record = SubmissionRecord::from_values(&values, &self.config.columns);
		self.process_row(row, &record).await
	}

	/// Runs the transition on `row` for the given submission
	pub async fn process_row(&self, row: u32, record: &SubmissionRecord) -> ClResult<RowOutcome> {
		let cols = &self.config.columns;

		let existing_key = self.sheet.get_cell(row, cols.api_key_col()).await?;
		if !existing_key.is_empty() {
			info!("API key already exists for row {}, skipping", row);
			return Ok(RowOutcome::AlreadyProcessed);
		}

		let api_key = keygen::generate_key();
		self.sheet.set_cell(row, cols.api_key_col(), &api_key).await?;
		info!("Issued API key {} for row {}", keygen::redact(&api_key), row);

		let email_status = match self.deliver(record, &api_key).await {
			SendOutcome::Sent => EmailStatus::Sent,
			SendOutcome::Failed(reason) => {
				warn!("Email failed to send for {} (row {}): {}", record.email, row, reason);
				EmailStatus::Failed
			}
		};
		self.sheet.set_cell(row, cols.email_sent_col(), email_status.as_str()).await?;

		if email_status == EmailStatus::Sent {
			info!("Beta onboarding completed for {} (row {})", record.email, row);
		}
		Ok(RowOutcome::Onboarded { api_key, email_status })
	}

	/// Composes and sends the welcome email. Every failure becomes a failed outcome.
	async fn deliver(&self, record: &SubmissionRecord, api_key: &str) -> SendOutcome {
		if record.email.is_empty() {
			return SendOutcome::Failed("submission has no email address".into());
		}

		let composed = match self.composer.compose(record, api_key) {
			Ok(composed) => composed,
			Err(e) => return SendOutcome::Failed(format!("cannot compose welcome email: {}", e)),
		};

		let message = composed.into_message(&record.email, &self.config.from_name);
		self.sender.send(&message).await
	}

	async fn check_data_row(&self, row: u32) -> ClResult<()> {
		if row < FIRST_DATA_ROW {
			return Err(Error::ValidationError(format!("row {} is not a data row", row)));
		}
		let row_count = self.sheet.row_count().await?;
		if row > row_count {
			return Err(Error::OutOfRange { row, col: self.config.columns.api_key_col() });
		}
		Ok(())
	}
}

// vim: ts=4
