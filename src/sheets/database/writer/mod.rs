// src/sheets/database/writer/mod.rs
// Sparse row writes: only the cells named in a record are touched.

mod helpers;
#[cfg(test)]
pub(crate) mod test_helpers;

pub use helpers::build_sparse_upsert_sql;

use super::schema::{header_positions, SheetHandle};
use crate::error::AppResult;
use crate::sheets::definitions::{CellValue, Record};
use rusqlite::ToSql;
use tracing::debug;

/// Write `record` into `row_index`. Column positions come from the live header row;
/// names missing from it are skipped without error. Returns the number of cells written.
///
/// Not transactional across records: an interrupted batch of writes may leave some
/// records written and others not.
pub fn write_record(sheet: &SheetHandle<'_>, row_index: u32, record: &Record) -> AppResult<usize> {
    let header = sheet.header()?;
    let positions = header_positions(&header);

    let mut columns: Vec<String> = Vec::with_capacity(record.len());
    let mut values: Vec<&CellValue> = Vec::with_capacity(record.len());
    for (name, value) in record.iter() {
        match positions.get(&name.to_lowercase()) {
            Some(&pos) => {
                // A record naming the same column twice keeps the later value.
                if let Some(existing) = columns.iter().position(|c| c == &header[pos]) {
                    values[existing] = value;
                } else {
                    columns.push(header[pos].clone());
                    values.push(value);
                }
            }
            None => debug!(
                "Ignoring column '{}' not present in sheet '{}'",
                name,
                sheet.name()
            ),
        }
    }

    if columns.is_empty() {
        return Ok(0);
    }

    let sql = build_sparse_upsert_sql(sheet.name(), &columns);
    let mut params: Vec<&dyn ToSql> = Vec::with_capacity(values.len() + 1);
    params.push(&row_index);
    for value in &values {
        params.push(*value);
    }
    sheet.store().conn().execute(&sql, params.as_slice())?;

    debug!(
        "Wrote {} cells to row {} of sheet '{}'",
        columns.len(),
        row_index,
        sheet.name()
    );
    Ok(columns.len())
}
