// src/cli/list_columns.rs

use crate::error::AppResult;
use crate::settings::AppSettings;
use crate::sheets::database::schema::header_row;
use crate::sheets::database::Store;
use crate::sheets::SheetKind;

/// One header cell and how it relates to the canonical header.
#[derive(Debug, PartialEq)]
pub struct ColumnReport {
    pub position: usize,
    pub name: String,
    pub canonical: bool,
}

pub fn column_report(store: &Store, sheet: &str) -> AppResult<Option<(Vec<ColumnReport>, Vec<&'static str>)>> {
    let Some(header) = header_row(store.conn(), sheet)? else {
        return Ok(None);
    };
    let canonical = SheetKind::from_name(sheet)
        .map(|kind| kind.canonical_header())
        .unwrap_or(&[]);
    let report = header
        .iter()
        .enumerate()
        .map(|(i, name)| ColumnReport {
            position: i + 1,
            name: name.clone(),
            canonical: canonical.iter().any(|c| c.eq_ignore_ascii_case(name)),
        })
        .collect();
    let missing = canonical
        .iter()
        .copied()
        .filter(|c| !header.iter().any(|h| h.eq_ignore_ascii_case(c)))
        .collect();
    Ok(Some((report, missing)))
}

pub fn run(settings: &AppSettings, sheet: &str) -> AppResult<()> {
    let store = Store::open(settings)?;
    println!("Opening: {}\n", store.url());

    let Some((columns, missing)) = column_report(&store, sheet)? else {
        println!("Sheet '{}' does not exist", sheet);
        return Ok(());
    };

    println!("=== {} Header Row ===\n", sheet);
    println!("{:<6} {:<24} {}", "Pos", "Column Name", "Kind");
    println!("{}", "-".repeat(44));
    for col in &columns {
        println!(
            "{:<6} {:<24} {}",
            col.position,
            col.name,
            if col.canonical { "canonical" } else { "extra" }
        );
    }
    if !missing.is_empty() {
        println!("\nMissing canonical columns (run `init` to add): {}", missing.join(", "));
    }
    Ok(())
}
