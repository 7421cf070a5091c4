// src/assessment/payload.rs
// Request and response shapes exchanged with the form, in its camelCase JSON.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPayload {
    pub batch_id: String,
    pub peril_type: String,
    pub impact_level: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub artist: String,
    pub material: String,
    pub date: String,
    pub dimensions: String,
    pub features: String,
    #[serde(alias = "historicIssuesPresent", deserialize_with = "flexible_bool")]
    pub historic_yes: bool,
    pub historic_code: String,
    pub historic_notes: String,
    #[serde(deserialize_with = "flexible_number")]
    pub treatment_time: Option<f64>,
    pub treatment_time_unit: String,
    pub additional_notes: String,
    pub other_notes: String,
    pub selections: Vec<SelectionPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionPayload {
    #[serde(alias = "code")]
    pub option_code: String,
    pub severity: String,
    #[serde(deserialize_with = "flexible_number")]
    pub extent_percent: Option<f64>,
    pub location: String,
    pub item_type: String,
    #[serde(deserialize_with = "flexible_bool")]
    pub use_severity: bool,
    pub severity_word: String,
    pub base_phrase: String,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_localized: bool,
    pub loc_part: String,
    pub ext_part: String,
    pub cond_line: String,
    pub global_frag: String,
    pub local_text: String,
    pub local_where: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhotoPayload {
    #[serde(alias = "data")]
    pub data_url: String,
    pub caption: String,
    pub taken_at: String,
    #[serde(deserialize_with = "flexible_number")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "flexible_number")]
    pub lng: Option<f64>,
    pub uploader: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreated {
    pub batch_id: String,
    pub client_folder_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSaved {
    pub item_id: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotosSaved {
    pub saved: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseInitialized {
    pub document_url: String,
    pub sheets: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

/// Accepts `true`, `"Yes"`, `"y"`, `"true"`, `"1"` or `1` as true; anything else is false.
fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Bool(b) => b,
        Loose::Number(n) => n != 0.0,
        Loose::Text(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "yes" | "y" | "true" | "1" | "on"
        ),
        Loose::Null => false,
    })
}

/// Accepts numbers or numeric strings; blank or unparsable input becomes `None`.
fn flexible_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Number(n) if n.is_finite() => Some(n),
        Loose::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}
