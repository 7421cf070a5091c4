// src/sheets/database/schema/mod.rs

mod helpers;
pub mod queries;
pub mod writer;

pub use helpers::*;
pub use queries::{header_positions, header_row, sheet_exists};

use super::connection::Store;
use crate::error::AppResult;
use tracing::debug;

/// A sheet known to satisfy some canonical header. Holds no header snapshot: readers
/// and writers re-read the live header row every time.
#[derive(Clone, Copy)]
pub struct SheetHandle<'a> {
    store: &'a Store,
    name: &'a str,
}

impl<'a> SheetHandle<'a> {
    pub fn store(&self) -> &'a Store {
        self.store
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn header(&self) -> AppResult<Vec<String>> {
        Ok(header_row(self.store.conn(), self.name)?.unwrap_or_default())
    }
}

/// Make sure `name` exists and carries every column of `canonical_header`.
///
/// A missing sheet is created with the canonical columns in order. On an existing sheet
/// the missing canonical columns are appended after the last column; existing columns,
/// extra hand-added columns and data rows are left alone. Safe to call any number of
/// times, including with a header that has grown since the last call.
pub fn ensure_sheet<'a>(
    store: &'a Store,
    name: &'a str,
    canonical_header: &[&str],
) -> AppResult<SheetHandle<'a>> {
    let conn = store.conn();
    match header_row(conn, name)? {
        None => writer::create_sheet_table(conn, name, canonical_header)?,
        Some(current) => {
            let missing = missing_columns(canonical_header, &current);
            if missing.is_empty() {
                debug!("Sheet '{}' already satisfies its header", name);
            }
            for column in missing {
                writer::append_column(conn, name, column)?;
            }
        }
    }
    Ok(SheetHandle { store, name })
}
