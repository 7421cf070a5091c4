// src/sheets/database/schema/writer.rs
// Structural writes: sheet creation and column growth. Never touches data rows.

use super::helpers::{quote_column_list, quote_identifier, ROW_INDEX_COLUMN};
use crate::error::AppResult;
use rusqlite::Connection;
use tracing::info;

/// Create a sheet table with the given header. Columns are untyped so every cell keeps
/// the storage class it was written with.
pub fn create_sheet_table(conn: &Connection, sheet_name: &str, header: &[&str]) -> AppResult<()> {
    let mut columns = format!("{} INTEGER PRIMARY KEY", ROW_INDEX_COLUMN);
    if !header.is_empty() {
        columns.push_str(", ");
        columns.push_str(&quote_column_list(header));
    }
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_identifier(sheet_name),
            columns
        ),
        [],
    )?;
    info!("Created sheet '{}' with {} columns", sheet_name, header.len());
    Ok(())
}

/// Append a column after the last existing column.
pub fn append_column(conn: &Connection, sheet_name: &str, column_name: &str) -> AppResult<()> {
    conn.execute(
        &format!(
            "ALTER TABLE {} ADD COLUMN {}",
            quote_identifier(sheet_name),
            quote_identifier(column_name)
        ),
        [],
    )?;
    info!("Added column '{}' to sheet '{}'", column_name, sheet_name);
    Ok(())
}
