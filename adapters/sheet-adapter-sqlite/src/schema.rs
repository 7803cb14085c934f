//! Database schema initialization

use sqlx::SqlitePool;

/// Creates the cell table. Safe to run on every start.
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS cells (
		row integer NOT NULL,
		col integer NOT NULL,
		value text NOT NULL,
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(row, col)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_cells_col ON cells(col)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;
	Ok(())
}

// vim: ts=4
