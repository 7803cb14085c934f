//! SQLite-backed submission sheet
//!
//! Every non-empty cell is one row of the `cells` table, keyed by its 1-based
//! coordinates. Rows and columns that were never written read as empty.

use async_trait::async_trait;
use sqlx::{
	Row,
	sqlite::{self, SqlitePool},
};
use std::path::Path;
use std::time::Duration;
use tokio::sync::Mutex;

use onboard_types::prelude::*;
use onboard_types::sheet_adapter::{SheetAdapter, check_coords};

mod schema;

use schema::init_db;

fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

fn db_err(err: sqlx::Error) -> Error {
	inspect(&err);
	Error::DbError
}

fn to_index(value: i64) -> ClResult<u32> {
	u32::try_from(value).map_err(|_| Error::DbError)
}

#[derive(Debug)]
pub struct SheetAdapterSqlite {
	db: SqlitePool,
	/// Serializes appends, the next row index is read before inserting
	append_lock: Mutex<()>,
}

impl SheetAdapterSqlite {
	/// Opens (or creates) the sheet database file at `path`
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		let path = path.as_ref();
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await?;
		}

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path)
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal)
			.busy_timeout(Duration::from_secs(5));
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.map_err(db_err)?;

		init_db(&db).await.map_err(db_err)?;
		debug!("Sheet database opened: {}", path.display());

		Ok(Self { db, append_lock: Mutex::new(()) })
	}
}

#[async_trait]
impl SheetAdapter for SheetAdapterSqlite {
	async fn get_cell(&self, row: u32, col: u32) -> ClResult<String> {
		check_coords(row, col)?;
		let res = sqlx::query("SELECT value FROM cells WHERE row = ?1 AND col = ?2")
			.bind(row)
			.bind(col)
			.fetch_optional(&self.db)
			.await
			.map_err(db_err)?;

		match res {
			Some(r) => r.try_get("value").map_err(db_err),
			None => Ok(String::new()),
		}
	}

	async fn set_cell(&self, row: u32, col: u32, value: &str) -> ClResult<()> {
		check_coords(row, col)?;
		sqlx::query(
			"INSERT INTO cells (row, col, value) VALUES (?1, ?2, ?3)
			ON CONFLICT(row, col) DO UPDATE SET value = excluded.value, updated_at = unixepoch()",
		)
		.bind(row)
		.bind(col)
		.bind(value)
		.execute(&self.db)
		.await
		.map_err(db_err)?;
		Ok(())
	}

	async fn row_count(&self) -> ClResult<u32> {
		let r = sqlx::query("SELECT coalesce(max(row), 0) AS n FROM cells")
			.fetch_one(&self.db)
			.await
			.map_err(db_err)?;
		to_index(r.try_get("n").map_err(db_err)?)
	}

	async fn column_count(&self) -> ClResult<u32> {
		let r = sqlx::query("SELECT coalesce(max(col), 0) AS n FROM cells")
			.fetch_one(&self.db)
			.await
			.map_err(db_err)?;
		to_index(r.try_get("n").map_err(db_err)?)
	}

	async fn append_row(&self, values: &[String]) -> ClResult<u32> {
		let _guard = self.append_lock.lock().await;
		let mut tx = self.db.begin().await.map_err(db_err)?;

		let r = sqlx::query("SELECT coalesce(max(row), 0) + 1 AS n FROM cells")
			.fetch_one(&mut *tx)
			.await
			.map_err(db_err)?;
		let row = to_index(r.try_get("n").map_err(db_err)?)?;

		for (idx, value) in values.iter().enumerate() {
			let col = u32::try_from(idx + 1).map_err(|_| Error::OutOfRange { row, col: u32::MAX })?;
			sqlx::query("INSERT INTO cells (row, col, value) VALUES (?1, ?2, ?3)")
				.bind(row)
				.bind(col)
				.bind(value)
				.execute(&mut *tx)
				.await
				.map_err(db_err)?;
		}

		tx.commit().await.map_err(db_err)?;
		Ok(row)
	}
}

// vim: ts=4
