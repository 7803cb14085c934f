//! SQLite sheet adapter tests

use onboard_sheet_adapter_sqlite::SheetAdapterSqlite;
use std::collections::HashSet;
use std::sync::Arc;
use onboard_types::error::Error;
use onboard_types::sheet_adapter::SheetAdapter;
use tempfile::TempDir;

async fn create_test_adapter() -> (SheetAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = SheetAdapterSqlite::new(temp_dir.path().join("sheet.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn test_empty_sheet() {
	let (adapter, _temp) = create_test_adapter().await;

	assert_eq!(adapter.row_count().await.unwrap(), 0);
	assert_eq!(adapter.column_count().await.unwrap(), 0);
	assert_eq!(adapter.get_cell(1, 1).await.unwrap(), "");
}

#[tokio::test]
async fn test_set_and_overwrite_cell() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.set_cell(2, 8, "ldp_live_a").await.unwrap();
	assert_eq!(adapter.get_cell(2, 8).await.unwrap(), "ldp_live_a");

	adapter.set_cell(2, 8, "ldp_live_b").await.unwrap();
	assert_eq!(adapter.get_cell(2, 8).await.unwrap(), "ldp_live_b");
	assert_eq!(adapter.row_count().await.unwrap(), 2);
	assert_eq!(adapter.column_count().await.unwrap(), 8);
}

#[tokio::test]
async fn test_append_row() {
	let (adapter, _temp) = create_test_adapter().await;

	let header = adapter.append_row(&strings(&["Timestamp", "Email"])).await.unwrap();
	let first = adapter.append_row(&strings(&["2025-01-01", "ana@x.com"])).await.unwrap();
	let second = adapter.append_row(&strings(&["2025-01-02", "bo@x.com"])).await.unwrap();

	assert_eq!((header, first, second), (1, 2, 3));
	assert_eq!(adapter.read_row(3, 3).await.unwrap(), vec!["2025-01-02", "bo@x.com", ""]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_get_distinct_rows() {
	let (adapter, _temp) = create_test_adapter().await;
	let adapter = Arc::new(adapter);
	adapter.append_row(&strings(&["Timestamp", "Email"])).await.unwrap();

	let tasks: Vec<_> = (0..8)
		.map(|i| {
			let adapter = adapter.clone();
			tokio::spawn(async move {
				adapter.append_row(&strings(&["2025-01-01", &format!("user{}@x.com", i)])).await
			})
		})
		.collect();

	let mut rows = HashSet::new();
	for task in tasks {
		rows.insert(task.await.unwrap().unwrap());
	}

	assert_eq!(rows, (2..=9).collect::<HashSet<u32>>());
	assert_eq!(adapter.row_count().await.unwrap(), 9);
	let mut emails = HashSet::new();
	for row in 2..=9 {
		emails.insert(adapter.get_cell(row, 2).await.unwrap());
	}
	assert_eq!(emails.len(), 8);
}

#[tokio::test]
async fn test_zero_coordinates_rejected() {
	let (adapter, _temp) = create_test_adapter().await;

	assert!(matches!(adapter.get_cell(0, 1).await, Err(Error::OutOfRange { row: 0, col: 1 })));
	assert!(matches!(adapter.set_cell(1, 0, "x").await, Err(Error::OutOfRange { .. })));
}

#[tokio::test]
async fn test_values_survive_reopen() {
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("data").join("sheet.db");

	{
		let adapter = SheetAdapterSqlite::new(&path).await.unwrap();
		adapter.append_row(&strings(&["Timestamp", "Email"])).await.unwrap();
		adapter.set_cell(1, 9, "Email Sent").await.unwrap();
	}

	let adapter = SheetAdapterSqlite::new(&path).await.unwrap();
	assert_eq!(adapter.get_cell(1, 2).await.unwrap(), "Email");
	assert_eq!(adapter.get_cell(1, 9).await.unwrap(), "Email Sent");
	assert_eq!(adapter.column_count().await.unwrap(), 9);
}

// vim: ts=4
