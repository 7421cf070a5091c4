// src/sheets/database/reader.rs

use super::connection::Store;
use super::schema::{header_row, quote_column_list, quote_identifier, ROW_INDEX_COLUMN};
use crate::error::AppResult;
use crate::sheets::definitions::{CellValue, Record};

/// Read every data row of a sheet as records keyed by header name, ordered by row.
///
/// Returns an empty list when the sheet does not exist or holds no data rows. When the
/// header repeats a name, the value from the last such column wins.
pub fn read_all(store: &Store, sheet_name: &str) -> AppResult<Vec<Record>> {
    let header = match header_row(store.conn(), sheet_name)? {
        Some(header) if !header.is_empty() => header,
        _ => return Ok(Vec::new()),
    };

    let sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        quote_column_list(&header),
        quote_identifier(sheet_name),
        ROW_INDEX_COLUMN
    );
    let mut stmt = store.conn().prepare(&sql)?;
    let records = stmt
        .query_map([], |row| {
            let mut record = Record::new();
            for (pos, name) in header.iter().enumerate() {
                record.set(name, CellValue::from_value_ref(row.get_ref(pos)?));
            }
            Ok(record)
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}
