//! Backfill sweep over the rows already in the sheet
//!
//! Strictly sequential: one row at a time, with the configured pacing delay
//! after every attempted row to stay below the mail transport's rate limits.

use std::time::Duration;

use tracing::Instrument;

use crate::prelude::*;
use crate::processor::{FIRST_DATA_ROW, SubmissionProcessor};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillReport {
	/// Data rows looked at
	pub scanned: u32,
	/// Rows that were issued a key
	pub processed: u32,
	/// Processed rows whose welcome email failed
	pub emails_failed: u32,
	/// Rows skipped because of an error
	pub errors: u32,
}

pub struct BackfillRunner {
	processor: SubmissionProcessor,
	pacing: Duration,
}

impl BackfillRunner {
	pub fn new(processor: SubmissionProcessor) -> Self {
		let pacing = processor.config().pacing;
		Self { processor, pacing }
	}

	/// Processes every row without an API key. Row errors are logged and skipped.
	pub async fn run_backfill(&self) -> ClResult<BackfillReport> {
		let sheet = self.processor.sheet();
		let api_key_col = self.processor.config().columns.api_key_col();
		let last_row = sheet.row_count().await?;
		let mut report = BackfillReport::default();

		info!("Processing existing responses (rows {}..={})", FIRST_DATA_ROW, last_row);

		for row in FIRST_DATA_ROW..=last_row {
			report.scanned += 1;

			match sheet.get_cell(row, api_key_col).await {
				Ok(key) if !key.is_empty() => continue,
				Ok(_) => {}
				Err(e) => {
					error!("Cannot read API key of row {}: {}", row, e);
					report.errors += 1;
					continue;
				}
			}

			let attempt =
				self.processor.process_stored_row(row).instrument(info_span!("backfill", row));
			match attempt.await {
				Ok(RowOutcome::Onboarded { email_status, .. }) => {
					report.processed += 1;
					if email_status == EmailStatus::Failed {
						report.emails_failed += 1;
					}
					info!("Processed row {} (email: {})", row, email_status);
				}
				Ok(RowOutcome::AlreadyProcessed) => {}
				Err(e) => {
					error!("Error processing row {}: {}", row, e);
					report.errors += 1;
				}
			}

			if !self.pacing.is_zero() {
				tokio::time::sleep(self.pacing).await;
			}
		}

		info!(
			"Processed {} existing responses ({} scanned, {} emails failed, {} errors)",
			report.processed, report.scanned, report.emails_failed, report.errors
		);
		Ok(report)
	}
}

// vim: ts=4
