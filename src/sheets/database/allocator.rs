// src/sheets/database/allocator.rs

use super::schema::{quote_identifier, SheetHandle, FIRST_DATA_ROW, ROW_INDEX_COLUMN};
use crate::error::{AppError, AppResult};
use rusqlite::OptionalExtension;

/// Row just past the last row whose key cell renders as non-empty text.
///
/// Blank rows below that point are not claimed and blank rows above it are not reused,
/// so formulas or stray edits in other columns never move the append point. Returns
/// [`FIRST_DATA_ROW`] when the key column is empty.
pub fn next_free_row(sheet: &SheetHandle<'_>, key_column: &str) -> AppResult<u32> {
    let header = sheet.header()?;
    let key = header
        .iter()
        .find(|name| name.eq_ignore_ascii_case(key_column))
        .ok_or_else(|| {
            AppError::Schema(format!(
                "Key column '{}' not found in sheet '{}'",
                key_column,
                sheet.name()
            ))
        })?;

    let key = quote_identifier(key);
    let last: Option<i64> = sheet
        .store()
        .conn()
        .query_row(
            &format!(
                "SELECT MAX({row}) FROM {table} WHERE {key} IS NOT NULL AND CAST({key} AS TEXT) <> ''",
                row = ROW_INDEX_COLUMN,
                table = quote_identifier(sheet.name()),
                key = key,
            ),
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    Ok(match last {
        Some(row) if row >= FIRST_DATA_ROW as i64 => row as u32 + 1,
        _ => FIRST_DATA_ROW,
    })
}
