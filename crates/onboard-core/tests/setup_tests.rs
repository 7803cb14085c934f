//! Sheet schema setup tests

mod common;

use std::sync::Arc;

use common::{RecordingSender, onboarding, sheet_with};
use onboard_types::memory_sheet::MemorySheet;
use onboard_types::sheet_adapter::SheetAdapter;

const ROW: [&str; 7] = ["2025-01-01", "one@x.com", "One", "", "", "", ""];

#[tokio::test]
async fn test_headers_added_once() {
	let sheet = Arc::new(sheet_with(&[&ROW, &ROW]));
	let onboarding = onboarding(sheet.clone(), Arc::new(RecordingSender::default()));
	let data_before = (sheet.row(2), sheet.row(3));

	let first = onboarding.ensure_schema().await.unwrap();
	assert_eq!(first.added, vec!["API Key", "Email Sent"]);
	assert_eq!(sheet.get_cell(1, 8).await.unwrap(), "API Key");
	assert_eq!(sheet.get_cell(1, 9).await.unwrap(), "Email Sent");
	let writes = sheet.write_count();

	let second = onboarding.ensure_schema().await.unwrap();
	assert!(second.added.is_empty());
	assert_eq!(sheet.write_count(), writes);

	assert_eq!(sheet.column_count().await.unwrap(), 9);
	assert_eq!((sheet.row(2), sheet.row(3)), data_before);
}

#[tokio::test]
async fn test_existing_header_kept() {
	let sheet = Arc::new(MemorySheet::with_rows([[
		"Timestamp", "Email", "Name", "Organization", "Role", "Use Case", "Source", "Key",
	]]));
	let onboarding = onboarding(sheet.clone(), Arc::new(RecordingSender::default()));

	let report = onboarding.ensure_schema().await.unwrap();

	assert_eq!(report.added, vec!["Email Sent"]);
	assert_eq!(sheet.get_cell(1, 8).await.unwrap(), "Key");
}

#[tokio::test]
async fn test_empty_sheet() {
	let sheet = Arc::new(MemorySheet::new());
	let onboarding = onboarding(sheet.clone(), Arc::new(RecordingSender::default()));

	onboarding.ensure_schema().await.unwrap();

	assert_eq!(sheet.row_count().await.unwrap(), 1);
	assert_eq!(sheet.get_cell(1, 1).await.unwrap(), "");
	assert_eq!(sheet.get_cell(1, 9).await.unwrap(), "Email Sent");
}

// vim: ts=4
