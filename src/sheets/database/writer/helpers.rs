// src/sheets/database/writer/helpers.rs
// SQL generation for sparse row writes

use crate::sheets::database::schema::{
    build_placeholders, quote_column_list, quote_identifier, ROW_INDEX_COLUMN,
};

/// Build an upsert that writes only `columns` at a given row index.
///
/// Cells of a new row that are not listed stay NULL; on an existing row the unlisted
/// cells are not part of the `SET` clause and keep their values.
pub fn build_sparse_upsert_sql(table_name: &str, columns: &[String]) -> String {
    let updates = columns
        .iter()
        .map(|c| {
            let quoted = quote_identifier(c);
            format!("{} = excluded.{}", quoted, quoted)
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {table} ({row}, {cols}) VALUES (?, {placeholders}) \
         ON CONFLICT({row}) DO UPDATE SET {updates}",
        table = quote_identifier(table_name),
        row = ROW_INDEX_COLUMN,
        cols = quote_column_list(columns),
        placeholders = build_placeholders(columns.len()),
        updates = updates,
    )
}
