// src/sheets/database/mod.rs

pub mod allocator;
pub mod connection;
pub mod reader;
pub mod schema;
pub mod writer;

pub use allocator::next_free_row;
pub use connection::Store;
pub use reader::read_all;
pub use schema::{ensure_sheet, SheetHandle};
pub use writer::write_record;

use crate::error::AppResult;
use crate::sheets::definitions::{Record, SheetKind};

/// Ensure the sheet, pick the row past its last key and write the record there.
/// Returns the row the record landed on.
pub fn append_record(store: &Store, kind: SheetKind, record: &Record) -> AppResult<u32> {
    let sheet = ensure_sheet(store, kind.name(), kind.canonical_header())?;
    let row = next_free_row(&sheet, kind.key_column())?;
    write_record(&sheet, row, record)?;
    Ok(row)
}
