// src/sheets/database/schema/helpers.rs

/// Internal column holding the 1-based sheet row number. Never part of the header row.
pub const ROW_INDEX_COLUMN: &str = "row_index";

/// Row 1 is the header; data starts on row 2.
pub const FIRST_DATA_ROW: u32 = 2;

/// Quote a SQL identifier, doubling any embedded quotes.
///
/// # Example
/// ```
/// # use assessdb::sheets::database::schema::quote_identifier;
/// assert_eq!(quote_identifier("Item \"A\""), "\"Item \"\"A\"\"\"");
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Build a comma-separated list of quoted column names.
pub fn quote_column_list<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|name| quote_identifier(name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build a string of SQL placeholders (?, ?, ?, ...).
pub fn build_placeholders(count: usize) -> String {
    (0..count).map(|_| "?").collect::<Vec<_>>().join(", ")
}

/// Names of `canonical` not present in `current`, in canonical order.
/// SQLite identifiers are case-insensitive, so the comparison is too.
pub fn missing_columns<'a>(canonical: &[&'a str], current: &[String]) -> Vec<&'a str> {
    canonical
        .iter()
        .copied()
        .filter(|name| !current.iter().any(|c| c.eq_ignore_ascii_case(name)))
        .collect()
}
