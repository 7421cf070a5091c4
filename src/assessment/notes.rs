// src/assessment/notes.rs
// Automatic note text: the Notes lookup sheet and the classification rules table.

use crate::sheets::database::{read_all, Store};
use crate::sheets::NOTES_SHEET;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// One classification: if any selected code is in `codes`, `sentence` is added.
/// A Notes-sheet row whose code equals `key` replaces the sentence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteCategory {
    pub key: String,
    pub codes: Vec<String>,
    pub sentence: String,
}

impl NoteCategory {
    pub fn matches(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c.eq_ignore_ascii_case(code.trim()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoteRules {
    /// Sentences emitted first when historic issues are present.
    pub historic: Vec<String>,
    /// Emitted when at least one condition code was selected.
    pub minor_difference: String,
    /// Checked in order after the generic sentence.
    pub categories: Vec<NoteCategory>,
}

impl Default for NoteRules {
    fn default() -> Self {
        Self {
            historic: vec![
                "Historic issues were noted on this object before the current assessment.".into(),
                "Evidence of earlier damage or past treatment may remain visible after conservation.".into(),
            ],
            minor_difference: "Following treatment, a minor difference in appearance may remain.".into(),
            categories: vec![
                NoteCategory {
                    key: "AUTO_STRUCTURAL".into(),
                    codes: vec![
                        "STRUCT_DAMAGED".into(),
                        "STRUCT_UNSTABLE".into(),
                        "STRUCT_LOOSE_JOINTS".into(),
                        "STRUCT_BROKEN_ELEMENT".into(),
                    ],
                    sentence: "The object is structurally unstable and should be handled with care until it has been stabilised.".into(),
                },
                NoteCategory {
                    key: "AUTO_FLATTENING".into(),
                    codes: vec![
                        "FLAT_CREASED".into(),
                        "FLAT_COCKLED".into(),
                        "FLAT_DISTORTED".into(),
                        "FLAT_ROLLED".into(),
                    ],
                    sentence: "Distortions may not flatten completely and some residual undulation should be expected.".into(),
                },
            ],
        }
    }
}

/// Code to note text from the externally authored Notes sheet.
#[derive(Debug, Default, Clone)]
pub struct NoteLookup {
    notes: HashMap<String, String>,
}

impl NoteLookup {
    /// Load the Notes sheet. A missing sheet, missing `Code`/`Note` columns or a read
    /// failure all give an empty lookup.
    pub fn load(store: &Store) -> Self {
        let rows = match read_all(store, NOTES_SHEET) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Notes lookup unavailable: {}", e);
                return Self::default();
            }
        };

        let mut notes = HashMap::new();
        for row in rows {
            let mut code = None;
            let mut note = None;
            for (name, value) in row.iter() {
                if name.eq_ignore_ascii_case("Code") {
                    code = Some(value.display());
                } else if name.eq_ignore_ascii_case("Note") {
                    note = Some(value.display());
                }
            }
            if let (Some(code), Some(note)) = (code, note) {
                let code = code.trim().to_uppercase();
                if !code.is_empty() {
                    notes.insert(code, note);
                }
            }
        }
        if notes.is_empty() {
            debug!("Notes sheet has no usable Code/Note rows");
        }
        Self { notes }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            notes: pairs
                .into_iter()
                .map(|(k, v)| (k.as_ref().trim().to_uppercase(), v.into()))
                .collect(),
        }
    }

    /// Note for `code`, or an empty string.
    pub fn lookup(&self, code: &str) -> String {
        let code = code.trim();
        if code.is_empty() {
            return String::new();
        }
        self.notes.get(&code.to_uppercase()).cloned().unwrap_or_default()
    }
}

/// Compose the auto notes for an item. Order: historic sentences, the generic
/// minor-difference sentence, then one sentence per matched category in rule order.
pub fn compose_auto_notes<S: AsRef<str>>(
    rules: &NoteRules,
    codes: &[S],
    historic_yes: bool,
    lookup: &NoteLookup,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    if historic_yes {
        lines.extend(rules.historic.iter().cloned());
    }

    let codes: Vec<&str> = codes
        .iter()
        .map(|c| c.as_ref().trim())
        .filter(|c| !c.is_empty())
        .collect();

    if !codes.is_empty() {
        lines.push(rules.minor_difference.clone());
        for category in &rules.categories {
            if codes.iter().any(|code| category.matches(code)) {
                let over = lookup.lookup(&category.key);
                lines.push(if over.is_empty() { category.sentence.clone() } else { over });
            }
        }
    }

    lines.retain(|line| !line.is_empty());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::database::{ensure_sheet, write_record};
    use crate::sheets::Record;

    #[test]
    fn historic_then_generic_then_structural() {
        let rules = NoteRules::default();
        let text = compose_auto_notes(&rules, &["STRUCT_DAMAGED"], true, &NoteLookup::default());
        let expected = [
            rules.historic[0].as_str(),
            rules.historic[1].as_str(),
            rules.minor_difference.as_str(),
            rules.categories[0].sentence.as_str(),
        ]
        .join("\n");
        assert_eq!(text, expected);
        assert!(!text.contains(&rules.categories[1].sentence));
    }

    #[test]
    fn no_codes_and_no_history_is_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(compose_auto_notes(&NoteRules::default(), &empty, false, &NoteLookup::default()), "");
    }

    #[test]
    fn history_alone_gives_only_historic_sentences() {
        let rules = NoteRules::default();
        let empty: [&str; 0] = [];
        let text = compose_auto_notes(&rules, &empty, true, &NoteLookup::default());
        assert_eq!(text, rules.historic.join("\n"));
    }

    #[test]
    fn both_categories_follow_rule_order() {
        let rules = NoteRules::default();
        let text = compose_auto_notes(&rules, &["flat_creased", "STRUCT_UNSTABLE"], false, &NoteLookup::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], rules.minor_difference);
        assert_eq!(lines[1], rules.categories[0].sentence);
        assert_eq!(lines[2], rules.categories[1].sentence);
    }

    #[test]
    fn unclassified_code_gives_generic_sentence_only() {
        let rules = NoteRules::default();
        let text = compose_auto_notes(&rules, &["SURFACE_DIRT"], false, &NoteLookup::default());
        assert_eq!(text, rules.minor_difference);
    }

    #[test]
    fn lookup_overrides_category_sentence() {
        let rules = NoteRules::default();
        let lookup = NoteLookup::from_pairs([("AUTO_FLATTENING", "Custom flattening text.")]);
        let text = compose_auto_notes(&rules, &["FLAT_ROLLED"], false, &lookup);
        assert!(text.ends_with("Custom flattening text."));
    }

    #[test]
    fn lookup_returns_empty_for_unknown_or_blank_code() {
        let lookup = NoteLookup::from_pairs([("H1", "Old repair")]);
        assert_eq!(lookup.lookup("h1"), "Old repair");
        assert_eq!(lookup.lookup("H2"), "");
        assert_eq!(lookup.lookup("  "), "");
    }

    #[test]
    fn load_without_notes_sheet_is_empty() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(NoteLookup::load(&store).lookup("H1"), "");
    }

    #[test]
    fn load_reads_code_and_note_columns() {
        let store = Store::open_in_memory().unwrap();
        let sheet = ensure_sheet(&store, NOTES_SHEET, &["code", "Note", "Author"]).unwrap();
        write_record(&sheet, 2, &Record::new().with("code", "H1").with("Note", "Previously repaired.")).unwrap();
        assert_eq!(NoteLookup::load(&store).lookup("H1"), "Previously repaired.");
    }

    #[test]
    fn load_with_malformed_sheet_is_empty() {
        let store = Store::open_in_memory().unwrap();
        let sheet = ensure_sheet(&store, NOTES_SHEET, &["Key", "Text"]).unwrap();
        write_record(&sheet, 2, &Record::new().with("Key", "H1").with("Text", "x")).unwrap();
        assert_eq!(NoteLookup::load(&store).lookup("H1"), "");
    }
}
