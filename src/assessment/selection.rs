// src/assessment/selection.rs

use super::ids;
use super::payload::SelectionPayload;
use crate::error::AppResult;
use crate::sheets::database::{append_record, Store};
use crate::sheets::{Record, SheetKind};

const REPLACEMENT_MARKER: &str = "replacement needed";
const REUPHOLSTERY_MARKER: &str = "reupholstery needed";

pub fn needs_replacement(notes: &str) -> bool {
    notes.to_lowercase().contains(REPLACEMENT_MARKER)
}

pub fn needs_reupholstery(notes: &str) -> bool {
    notes.to_lowercase().contains(REUPHOLSTERY_MARKER)
}

pub fn selection_record(selection_id: &str, item_id: &str, sel: &SelectionPayload) -> Record {
    Record::new()
        .with("SelectionID", selection_id)
        .with("ItemID", item_id)
        .with("OptionCode", sel.option_code.trim())
        .with("Severity", sel.severity.as_str())
        .with("ExtentPercent", sel.extent_percent)
        .with("Location", sel.location.as_str())
        .with("ItemType", sel.item_type.as_str())
        .with("UseSeverity", sel.use_severity)
        .with("SeverityWord", sel.severity_word.as_str())
        .with("BasePhrase", sel.base_phrase.as_str())
        .with("IsLocalized", sel.is_localized)
        .with("LocPart", sel.loc_part.as_str())
        .with("ExtPart", sel.ext_part.as_str())
        .with("CondLine", sel.cond_line.as_str())
        .with("GlobalFrag", sel.global_frag.as_str())
        .with("LocalText", sel.local_text.as_str())
        .with("LocalWhere", sel.local_where.as_str())
        .with("NeedsReplacement", needs_replacement(&sel.notes))
        .with("NeedsReupholstery", needs_reupholstery(&sel.notes))
}

/// Append one selection row for `item_id` and return its id.
pub fn append_selection(store: &Store, item_id: &str, sel: &SelectionPayload) -> AppResult<String> {
    let id = ids::selection_id();
    append_record(store, SheetKind::Selections, &selection_record(&id, item_id, sel))?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::database::read_all;
    use crate::sheets::CellValue;

    #[test]
    fn markers_match_any_case() {
        assert!(needs_replacement("Seat: REPLACEMENT NEEDED soon"));
        assert!(needs_reupholstery("reupholstery Needed"));
        assert!(!needs_replacement("replacement not needed"));
        assert!(!needs_reupholstery(""));
    }

    #[test]
    fn flags_are_written_per_selection() {
        let store = Store::open_in_memory().unwrap();
        let replace = SelectionPayload {
            option_code: "STRUCT_DAMAGED".into(),
            notes: "Replacement needed".into(),
            ..Default::default()
        };
        let plain = SelectionPayload {
            option_code: "SURFACE_DIRT".into(),
            ..Default::default()
        };
        append_selection(&store, "ITM-1", &replace).unwrap();
        append_selection(&store, "ITM-1", &plain).unwrap();

        let rows = read_all(&store, "Selections").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("NeedsReplacement"), Some(&CellValue::Bool(true)));
        assert_eq!(rows[0].get("NeedsReupholstery"), Some(&CellValue::Bool(false)));
        assert_eq!(rows[1].get("NeedsReplacement"), Some(&CellValue::Bool(false)));
        assert_eq!(rows[1].get("NeedsReupholstery"), Some(&CellValue::Bool(false)));
        assert!(rows[0].text("SelectionID").starts_with("SEL-"));
        assert_eq!(rows[1].text("OptionCode"), "SURFACE_DIRT");
    }
}
