// src/sheets/mod.rs

pub mod database;
pub mod definitions;

pub use definitions::{CellValue, Record, SheetKind, NOTES_SHEET};
