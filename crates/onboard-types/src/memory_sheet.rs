//! In-memory sheet, used by tests and dry runs

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::prelude::*;
use crate::sheet_adapter::{SheetAdapter, check_coords};

#[derive(Debug, Default)]
pub struct MemorySheet {
	rows: Mutex<Vec<Vec<String>>>,
	writes: AtomicUsize,
}

impl MemorySheet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a sheet from literal rows, the first one being the header
	pub fn with_rows<R, C>(rows: R) -> Self
	where
		R: IntoIterator<Item = C>,
		C: IntoIterator,
		C::Item: Into<String>,
	{
		let rows = rows.into_iter().map(|row| row.into_iter().map(Into::into).collect()).collect();
		Self { rows: Mutex::new(rows), writes: AtomicUsize::new(0) }
	}

	/// Number of cell writes performed since creation
	pub fn write_count(&self) -> usize {
		self.writes.load(Ordering::SeqCst)
	}

	/// Copy of a row, without trailing padding
	pub fn row(&self, row: u32) -> Vec<String> {
		let rows = self.rows.lock();
		row.checked_sub(1)
			.and_then(|idx| rows.get(idx as usize))
			.cloned()
			.unwrap_or_default()
	}

	fn cell(&self, row: u32, col: u32) -> String {
		let rows = self.rows.lock();
		rows.get(row as usize - 1)
			.and_then(|r| r.get(col as usize - 1))
			.cloned()
			.unwrap_or_default()
	}
}

#[async_trait]
impl SheetAdapter for MemorySheet {
	async fn get_cell(&self, row: u32, col: u32) -> ClResult<String> {
		check_coords(row, col)?;
		Ok(self.cell(row, col))
	}

	async fn set_cell(&self, row: u32, col: u32, value: &str) -> ClResult<()> {
		check_coords(row, col)?;
		let (r, c) = (row as usize - 1, col as usize - 1);
		let mut rows = self.rows.lock();
		if rows.len() <= r {
			rows.resize_with(r + 1, Vec::new);
		}
		let cells = &mut rows[r];
		if cells.len() <= c {
			cells.resize(c + 1, String::new());
		}
		cells[c] = value.to_string();
		self.writes.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}

	async fn row_count(&self) -> ClResult<u32> {
		let rows = self.rows.lock();
		u32::try_from(rows.len()).map_err(|_| Error::DbError)
	}

	async fn column_count(&self) -> ClResult<u32> {
		let rows = self.rows.lock();
		let width = rows.iter().map(Vec::len).max().unwrap_or(0);
		u32::try_from(width).map_err(|_| Error::DbError)
	}

	async fn append_row(&self, values: &[String]) -> ClResult<u32> {
		let mut rows = self.rows.lock();
		rows.push(values.to_vec());
		self.writes.fetch_add(values.len(), Ordering::SeqCst);
		u32::try_from(rows.len()).map_err(|_| Error::DbError)
	}
}


// vim: ts=4
