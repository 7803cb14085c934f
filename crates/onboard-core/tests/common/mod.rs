//! Shared fakes for the onboarding tests
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use onboard_core::{OnboardConfig, Onboarding};
use onboard_types::email_adapter::{EmailMessage, EmailSender, SendOutcome};
use onboard_types::error::{ClResult, Error};
use onboard_types::memory_sheet::MemorySheet;
use onboard_types::sheet_adapter::SheetAdapter;

pub const HEADER: [&str; 7] =
	["Timestamp", "Email", "Name", "Organization", "Role", "Use Case", "Source"];

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Records every send attempt, failing for the configured recipients
#[derive(Debug, Default)]
pub struct RecordingSender {
	attempts: Mutex<Vec<EmailMessage>>,
	fail_for: HashSet<String>,
}

impl RecordingSender {
	pub fn failing_for(addresses: &[&str]) -> Self {
		Self {
			attempts: Mutex::new(Vec::new()),
			fail_for: addresses.iter().map(ToString::to_string).collect(),
		}
	}

	pub fn attempts(&self) -> Vec<EmailMessage> {
		self.attempts.lock().clone()
	}

	pub fn count(&self) -> usize {
		self.attempts.lock().len()
	}
}

#[async_trait]
impl EmailSender for RecordingSender {
	async fn send(&self, message: &EmailMessage) -> SendOutcome {
		self.attempts.lock().push(message.clone());
		if self.fail_for.contains(&message.to) {
			SendOutcome::Failed("simulated transport failure".into())
		} else {
			SendOutcome::Sent
		}
	}
}

/// Memory sheet whose writes fail for one row
#[derive(Debug)]
pub struct FlakySheet {
	pub inner: MemorySheet,
	pub broken_row: u32,
}

#[async_trait]
impl SheetAdapter for FlakySheet {
	async fn get_cell(&self, row: u32, col: u32) -> ClResult<String> {
		self.inner.get_cell(row, col).await
	}

	async fn set_cell(&self, row: u32, col: u32, value: &str) -> ClResult<()> {
		if row == self.broken_row {
			return Err(Error::DbError);
		}
		self.inner.set_cell(row, col, value).await
	}

	async fn row_count(&self) -> ClResult<u32> {
		self.inner.row_count().await
	}

	async fn column_count(&self) -> ClResult<u32> {
		self.inner.column_count().await
	}

	async fn append_row(&self, values: &[String]) -> ClResult<u32> {
		self.inner.append_row(values).await
	}
}

pub fn test_config() -> OnboardConfig {
	OnboardConfig::builder().pacing(Duration::ZERO).build().unwrap()
}

/// Sheet with the header row followed by the given submissions
pub fn sheet_with(rows: &[&[&str]]) -> MemorySheet {
	let mut all: Vec<Vec<String>> = vec![HEADER.iter().map(ToString::to_string).collect()];
	all.extend(rows.iter().map(|r| r.iter().map(ToString::to_string).collect::<Vec<String>>()));
	MemorySheet::with_rows(all)
}

pub fn values(v: &[&str]) -> Vec<String> {
	v.iter().map(ToString::to_string).collect()
}

pub fn onboarding(
	sheet: Arc<dyn SheetAdapter>,
	sender: Arc<dyn EmailSender>,
) -> Onboarding {
	Onboarding::new(test_config(), sheet, sender)
}

// vim: ts=4
