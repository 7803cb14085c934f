//! Adapter that stores the submission sheet.
//!
//! A sheet is a row-oriented table of text cells addressed 1-based, row 1
//! holding the column headers. Cells outside the populated area read as empty.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait SheetAdapter: Debug + Send + Sync {
	/// Reads a cell, empty string if the cell was never written
	async fn get_cell(&self, row: u32, col: u32) -> ClResult<String>;

	/// Writes a cell. The write is durable when the call returns.
	async fn set_cell(&self, row: u32, col: u32, value: &str) -> ClResult<()>;

	/// Index of the last populated row (0 for an empty sheet)
	async fn row_count(&self) -> ClResult<u32>;

	/// Index of the last populated column (0 for an empty sheet)
	async fn column_count(&self) -> ClResult<u32>;

	/// Appends the values as a new row after the last populated one, returning its index
	async fn append_row(&self, values: &[String]) -> ClResult<u32>;

	/// Reads the first `width` cells of a row
	async fn read_row(&self, row: u32, width: u32) -> ClResult<Vec<String>> {
		let mut values = Vec::with_capacity(width as usize);
		for col in 1..=width {
			values.push(self.get_cell(row, col).await?);
		}
		Ok(values)
	}
}

/// Rejects the 0 coordinate, which no sheet can address
pub fn check_coords(row: u32, col: u32) -> ClResult<()> {
	if row == 0 || col == 0 {
		return Err(Error::OutOfRange { row, col });
	}
	Ok(())
}

// vim: ts=4
