// src/assessment/item.rs

use super::notes::{compose_auto_notes, NoteLookup};
use super::selection::append_selection;
use super::{ids, require, AssessmentService, ItemPayload, ItemSaved};
use crate::error::AppResult;
use crate::sheets::database::{append_record, read_all, Store};
use crate::sheets::{CellValue, Record, SheetKind};
use tracing::{debug, error, info};

/// Treatment time as whole minutes plus the normalised unit and a display string.
pub fn treatment_time(value: Option<f64>, unit: &str) -> (CellValue, CellValue, CellValue) {
    let Some(value) = value else {
        return (CellValue::Blank, CellValue::Blank, CellValue::Blank);
    };
    let (unit, factor) = match unit.trim().to_ascii_lowercase().as_str() {
        "h" | "hr" | "hrs" | "hour" | "hours" => ("hours", 60.0),
        "d" | "day" | "days" => ("days", 1440.0),
        _ => ("minutes", 1.0),
    };
    let minutes = (value * factor).round() as i64;
    let label = if value == 1.0 { unit.trim_end_matches('s') } else { unit };
    (
        CellValue::Integer(minutes),
        CellValue::text(unit),
        CellValue::Text(format!("{} {}", value, label)),
    )
}

/// Number of items already recorded for `batch_id`.
fn items_in_batch(store: &Store, batch_id: &str) -> AppResult<usize> {
    Ok(read_all(store, SheetKind::Items.name())?
        .iter()
        .filter(|row| row.text("BatchID").trim() == batch_id)
        .count())
}

impl AssessmentService {
    /// Record an item and its condition selections. Failures are logged and returned.
    pub fn save_item(&self, payload: &ItemPayload) -> AppResult<ItemSaved> {
        self.save_item_inner(payload).map_err(|e| {
            error!("saveItem failed for batch '{}': {}", payload.batch_id, e);
            e
        })
    }

    fn save_item_inner(&self, payload: &ItemPayload) -> AppResult<ItemSaved> {
        let batch_id = require(&payload.batch_id, "batchId")?;
        let selections: Vec<_> = payload
            .selections
            .iter()
            .filter(|sel| !sel.option_code.trim().is_empty())
            .collect();
        if selections.len() < payload.selections.len() {
            debug!(
                "Skipping {} selections without an option code",
                payload.selections.len() - selections.len()
            );
        }

        let store = self.open_store()?;
        let item_id = ids::item_id();
        let code = ids::item_code(items_in_batch(&store, batch_id)? + 1);

        let lookup = NoteLookup::load(&store);
        let historic_notes = if payload.historic_notes.trim().is_empty() {
            lookup.lookup(&payload.historic_code)
        } else {
            payload.historic_notes.clone()
        };
        let codes: Vec<&str> = selections.iter().map(|s| s.option_code.as_str()).collect();
        let auto_notes = compose_auto_notes(
            &self.settings.note_rules,
            &codes,
            payload.historic_yes,
            &lookup,
        );
        let (minutes, unit, display) =
            treatment_time(payload.treatment_time, &payload.treatment_time_unit);

        let record = Record::new()
            .with("ItemID", item_id.as_str())
            .with("BatchID", batch_id)
            .with("Code", code.as_str())
            .with("PerilType", payload.peril_type.as_str())
            .with("ImpactLevel", payload.impact_level.as_str())
            .with("Type", payload.item_type.as_str())
            .with("Title", payload.title.as_str())
            .with("Artist", payload.artist.as_str())
            .with("Material", payload.material.as_str())
            .with("Date", payload.date.as_str())
            .with("Dimensions", payload.dimensions.as_str())
            .with("Features", payload.features.as_str())
            .with("HistoricIssuesPresent", if payload.historic_yes { "Yes" } else { "No" })
            .with("HistoricCode", payload.historic_code.trim())
            .with("HistoricNotes", historic_notes)
            .with("TreatmentTimeMinutes", minutes)
            .with("TreatmentTimeUnit", unit)
            .with("TreatmentTime", display)
            .with("AdditionalNotes", payload.additional_notes.as_str())
            .with("OtherNotes", payload.other_notes.as_str())
            .with("Notes", auto_notes)
            .with("CreatedAt", self.now()?.format("%Y-%m-%d %H:%M:%S").to_string());
        let row = append_record(&store, SheetKind::Items, &record)?;

        for sel in &selections {
            append_selection(&store, &item_id, sel)?;
        }

        info!(
            "Saved item {} ({}) in batch {} on row {} with {} selections",
            item_id,
            code,
            batch_id,
            row,
            selections.len()
        );
        Ok(ItemSaved { item_id, code })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::service;
    use super::super::SelectionPayload;
    use super::*;
    use crate::error::AppError;
    use crate::sheets::database::{ensure_sheet, write_record};
    use crate::sheets::NOTES_SHEET;

    fn item(batch_id: &str) -> ItemPayload {
        ItemPayload {
            batch_id: batch_id.into(),
            title: "Side chair".into(),
            ..Default::default()
        }
    }

    #[test]
    fn codes_count_per_batch() {
        let (_dir, service) = service();
        assert_eq!(service.save_item(&item("B1")).unwrap().code, "I001");
        assert_eq!(service.save_item(&item("B1")).unwrap().code, "I002");
        assert_eq!(service.save_item(&item("B2")).unwrap().code, "I001");
        assert_eq!(service.save_item(&item("B1")).unwrap().code, "I003");
    }

    #[test]
    fn missing_batch_id_is_rejected() {
        let (_dir, service) = service();
        assert!(matches!(service.save_item(&item("  ")), Err(AppError::Validation(f)) if f == "batchId"));
    }

    #[test]
    fn item_row_carries_derived_fields_and_selections() {
        let (_dir, service) = service();
        {
            let store = service.open_store().unwrap();
            let notes = ensure_sheet(&store, NOTES_SHEET, &["Code", "Note"]).unwrap();
            write_record(&notes, 2, &Record::new().with("Code", "HX").with("Note", "Old water damage.")).unwrap();
        }

        let mut payload = item("B1");
        payload.historic_yes = true;
        payload.historic_code = "HX".into();
        payload.treatment_time = Some(1.5);
        payload.treatment_time_unit = "hours".into();
        payload.selections = vec![
            SelectionPayload {
                option_code: "STRUCT_DAMAGED".into(),
                notes: "Reupholstery needed".into(),
                ..Default::default()
            },
            SelectionPayload {
                option_code: "SURFACE_DIRT".into(),
                ..Default::default()
            },
        ];
        let saved = service.save_item(&payload).unwrap();
        assert!(saved.item_id.starts_with("ITM-"));

        let store = service.open_store().unwrap();
        let items = read_all(&store, "Items").unwrap();
        assert_eq!(items.len(), 1);
        let row = &items[0];
        assert_eq!(row.text("ItemID"), saved.item_id);
        assert_eq!(row.text("Code"), "I001");
        assert_eq!(row.text("HistoricIssuesPresent"), "Yes");
        assert_eq!(row.text("HistoricNotes"), "Old water damage.");
        assert_eq!(row.get("TreatmentTimeMinutes"), Some(&CellValue::Integer(90)));
        assert_eq!(row.text("TreatmentTime"), "1.5 hours");
        let rules = &service.settings().note_rules;
        let notes = row.text("Notes");
        let lines: Vec<&str> = notes.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], rules.minor_difference);
        assert_eq!(lines[3], rules.categories[0].sentence);

        let selections = read_all(&store, "Selections").unwrap();
        assert_eq!(selections.len(), 2);
        assert!(selections.iter().all(|s| s.text("ItemID") == saved.item_id));
        assert_eq!(selections[0].get("NeedsReupholstery"), Some(&CellValue::Bool(true)));
        assert_eq!(selections[1].get("NeedsReupholstery"), Some(&CellValue::Bool(false)));
    }

    #[test]
    fn explicit_historic_notes_win_over_lookup() {
        let (_dir, service) = service();
        let mut payload = item("B1");
        payload.historic_code = "HX".into();
        payload.historic_notes = "Assessor's own words".into();
        service.save_item(&payload).unwrap();
        let store = service.open_store().unwrap();
        assert_eq!(read_all(&store, "Items").unwrap()[0].text("HistoricNotes"), "Assessor's own words");
    }

    #[test]
    fn treatment_time_defaults_to_minutes() {
        let (minutes, unit, display) = treatment_time(Some(45.0), "");
        assert_eq!(minutes, CellValue::Integer(45));
        assert_eq!(unit, CellValue::text("minutes"));
        assert_eq!(display, CellValue::text("45 minutes"));
        assert_eq!(treatment_time(None, "hours").0, CellValue::Blank);
    }

    #[test]
    fn treatment_time_in_days() {
        let (minutes, unit, display) = treatment_time(Some(2.0), "days");
        assert_eq!(minutes, CellValue::Integer(2880));
        assert_eq!(unit, CellValue::text("days"));
        assert_eq!(display, CellValue::text("2 days"));
        assert_eq!(treatment_time(Some(0.5), "d").0, CellValue::Integer(720));
    }

    #[test]
    fn single_units_read_singular() {
        assert_eq!(treatment_time(Some(1.0), "hours").2, CellValue::text("1 hour"));
        assert_eq!(treatment_time(Some(1.0), "").2, CellValue::text("1 minute"));
        assert_eq!(treatment_time(Some(1.0), "day").2, CellValue::text("1 day"));
        assert_eq!(treatment_time(Some(1.5), "hours").2, CellValue::text("1.5 hours"));
    }

    #[test]
    fn blank_selection_codes_are_skipped() {
        let (_dir, service) = service();
        let mut payload = item("B1");
        payload.selections = vec![
            SelectionPayload {
                option_code: "  ".into(),
                ..Default::default()
            },
            SelectionPayload {
                option_code: "FLAT_CREASED".into(),
                ..Default::default()
            },
        ];
        service.save_item(&payload).unwrap();
        let store = service.open_store().unwrap();
        let selections = read_all(&store, "Selections").unwrap();
        assert_eq!(selections.len(), 1);
        assert_eq!(selections[0].text("OptionCode"), "FLAT_CREASED");
    }
}
