// src/sheets/database/schema/queries.rs
// Read-only schema queries. Structural writes live in schema/writer.rs.

use super::helpers::{quote_identifier, ROW_INDEX_COLUMN};
use crate::error::AppResult;
use rusqlite::Connection;
use std::collections::HashMap;

/// Check if a sheet table exists in the document
pub fn sheet_exists(conn: &Connection, sheet_name: &str) -> AppResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = ? COLLATE NOCASE",
        [sheet_name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// The live header row: every column of the sheet table except the internal row index,
/// in physical order. `None` when the sheet does not exist.
pub fn header_row(conn: &Connection, sheet_name: &str) -> AppResult<Option<Vec<String>>> {
    if !sheet_exists(conn, sheet_name)? {
        return Ok(None);
    }
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_identifier(sheet_name)))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(
        columns
            .into_iter()
            .filter(|c| !c.eq_ignore_ascii_case(ROW_INDEX_COLUMN))
            .collect(),
    ))
}

/// Name to position map for a header row. Keys are lowercased; a repeated name maps to
/// its last position.
pub fn header_positions(header: &[String]) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(pos, name)| (name.to_lowercase(), pos))
        .collect()
}
