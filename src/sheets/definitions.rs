// src/sheets/definitions.rs

use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sheets this system writes to. Notes is authored outside the system and is only read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Batches,
    Items,
    Selections,
    Photos,
}

pub const NOTES_SHEET: &str = "Notes";

const BATCHES_HEADER: &[&str] = &["BatchID", "Client", "StartDate", "Assessor", "Status"];

const ITEMS_HEADER: &[&str] = &[
    "ItemID",
    "BatchID",
    "Code",
    "PerilType",
    "ImpactLevel",
    "Type",
    "Title",
    "Artist",
    "Material",
    "Date",
    "Dimensions",
    "Features",
    "HistoricIssuesPresent",
    "HistoricCode",
    "HistoricNotes",
    "TreatmentTimeMinutes",
    "TreatmentTimeUnit",
    "TreatmentTime",
    "AdditionalNotes",
    "OtherNotes",
    "Notes",
    "CreatedAt",
];

const SELECTIONS_HEADER: &[&str] = &[
    "SelectionID",
    "ItemID",
    "OptionCode",
    "Severity",
    "ExtentPercent",
    "Location",
    "ItemType",
    "UseSeverity",
    "SeverityWord",
    "BasePhrase",
    "IsLocalized",
    "LocPart",
    "ExtPart",
    "CondLine",
    "GlobalFrag",
    "LocalText",
    "LocalWhere",
    "NeedsReplacement",
    "NeedsReupholstery",
];

const PHOTOS_HEADER: &[&str] = &[
    "PhotoID", "ItemID", "Image", "Caption", "TakenAt", "Lat", "Lng", "Uploader",
];

impl SheetKind {
    pub const ALL: [SheetKind; 4] = [
        SheetKind::Batches,
        SheetKind::Items,
        SheetKind::Selections,
        SheetKind::Photos,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SheetKind::Batches => "Batches",
            SheetKind::Items => "Items",
            SheetKind::Selections => "Selections",
            SheetKind::Photos => "Photos",
        }
    }

    /// Column order used when the sheet is first created. Only ever append to these lists.
    pub fn canonical_header(self) -> &'static [&'static str] {
        match self {
            SheetKind::Batches => BATCHES_HEADER,
            SheetKind::Items => ITEMS_HEADER,
            SheetKind::Selections => SELECTIONS_HEADER,
            SheetKind::Photos => PHOTOS_HEADER,
        }
    }

    pub fn key_column(self) -> &'static str {
        self.canonical_header()[0]
    }

    pub fn from_name(name: &str) -> Option<SheetKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

/// A single cell. Booleans are stored the way a sheet displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Blank,
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// The rendered text of the cell, as a reader of the sheet would see it.
    pub fn display(&self) -> String {
        self.to_string()
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Blank => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn from_value_ref(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => CellValue::Blank,
            ValueRef::Integer(i) => CellValue::Integer(i),
            ValueRef::Real(f) => CellValue::Number(f),
            ValueRef::Text(bytes) => {
                let s = String::from_utf8_lossy(bytes);
                match s.as_ref() {
                    "TRUE" => CellValue::Bool(true),
                    "FALSE" => CellValue::Bool(false),
                    _ => CellValue::Text(s.into_owned()),
                }
            }
            ValueRef::Blob(bytes) => CellValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(true) => write!(f, "TRUE"),
            CellValue::Bool(false) => write!(f, "FALSE"),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Blank => Ok(()),
        }
    }
}

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            CellValue::Bool(b) => ToSqlOutput::Owned(Value::Text(
                if *b { "TRUE" } else { "FALSE" }.to_string(),
            )),
            CellValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            CellValue::Number(n) => ToSqlOutput::Owned(Value::Real(*n)),
            CellValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            CellValue::Blank => ToSqlOutput::Owned(Value::Null),
        })
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Blank)
    }
}

/// A partial row keyed by column name. Insertion order is kept; setting an
/// existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: &str, value: impl Into<CellValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column.to_string(), value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Displayed text of a column, empty when the column is absent.
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(CellValue::display).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
