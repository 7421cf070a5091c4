// src/sheets/database/writer/test_helpers.rs
// Test utilities for sheet reads that bypass the bulk reader

#![cfg(test)]

use crate::sheets::database::schema::quote_identifier;
use crate::sheets::database::Store;
use crate::sheets::definitions::CellValue;
use rusqlite::OptionalExtension;

/// Read a single cell. Absent rows read as blank.
///
/// # Example
/// ```ignore
/// assert_eq!(cell(&store, "Items", 2, "ItemID"), CellValue::text("ITM-1"));
/// ```
pub fn cell(store: &Store, sheet: &str, row_index: u32, column: &str) -> CellValue {
    store
        .conn()
        .query_row(
            &format!(
                "SELECT {} FROM {} WHERE row_index = ?",
                quote_identifier(column),
                quote_identifier(sheet)
            ),
            [row_index],
            |row| Ok(CellValue::from_value_ref(row.get_ref(0)?)),
        )
        .optional()
        .unwrap()
        .unwrap_or(CellValue::Blank)
}

/// Number of physical rows stored in a sheet table.
pub fn count_rows(store: &Store, sheet: &str) -> i64 {
    store
        .conn()
        .query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_identifier(sheet)),
            [],
            |row| row.get(0),
        )
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::database::schema::ensure_sheet;

    #[test]
    fn missing_row_reads_blank() {
        let store = Store::open_in_memory().unwrap();
        ensure_sheet(&store, "Items", &["ItemID"]).unwrap();
        assert_eq!(cell(&store, "Items", 9, "ItemID"), CellValue::Blank);
        assert_eq!(count_rows(&store, "Items"), 0);
    }
}
