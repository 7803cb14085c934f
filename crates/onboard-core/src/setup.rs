//! Sheet schema setup
//!
//! Writes the headers of the two derived columns when they are missing.
//! Only row 1 is ever touched, so running it again is harmless.

use crate::prelude::*;
use onboard_types::sheet_adapter::SheetAdapter;
use onboard_types::types::{API_KEY_HEADER, EMAIL_SENT_HEADER};

const HEADER_ROW: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
	/// Header labels written by this run
	pub added: Vec<&'static str>,
}

pub async fn ensure_schema(sheet: &dyn SheetAdapter, columns: &ColumnMap) -> ClResult<SchemaReport> {
	let mut report = SchemaReport::default();
	let column_count = sheet.column_count().await?;
	debug!("Sheet has {} columns", column_count);

	for (col, label) in
		[(columns.api_key_col(), API_KEY_HEADER), (columns.email_sent_col(), EMAIL_SENT_HEADER)]
	{
		let header = sheet.get_cell(HEADER_ROW, col).await?;
		if header.trim().is_empty() {
			sheet.set_cell(HEADER_ROW, col, label).await?;
			info!("Added \"{}\" column (column {})", label, col);
			report.added.push(label);
		} else if header.trim() != label {
			warn!("Column {} already has header \"{}\", expected \"{}\"", col, header, label);
		}
	}

	info!("Setup completed successfully");
	Ok(report)
}

// vim: ts=4
