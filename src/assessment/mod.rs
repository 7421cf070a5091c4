// src/assessment/mod.rs
// Record builders behind the four form operations.

mod batch;
pub mod ids;
mod item;
pub mod notes;
pub mod payload;
mod photos;
pub mod selection;

pub use payload::{
    BatchCreated, DatabaseInitialized, ItemPayload, ItemSaved, PhotoPayload, PhotosSaved,
    SelectionPayload,
};

use crate::error::{AppError, AppResult};
use crate::settings::AppSettings;
use crate::sheets::database::{ensure_sheet, Store};
use crate::sheets::SheetKind;
use crate::storage::{FileStore, JsonPropertyStore, LocalFileStore, PropertyStore};
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use tracing::info;

pub struct AssessmentService {
    settings: AppSettings,
    files: Box<dyn FileStore>,
    properties: Box<dyn PropertyStore>,
}

impl AssessmentService {
    pub fn new(
        settings: AppSettings,
        files: Box<dyn FileStore>,
        properties: Box<dyn PropertyStore>,
    ) -> Self {
        Self {
            settings,
            files,
            properties,
        }
    }

    /// Service backed by the local photo folder and JSON property file in the data dir.
    pub fn from_settings(settings: AppSettings) -> AppResult<Self> {
        let files = LocalFileStore::new(settings.photos_root()?);
        let properties = JsonPropertyStore::new(settings.properties_path()?);
        Ok(Self::new(settings, Box::new(files), Box::new(properties)))
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Every operation opens the document afresh.
    fn open_store(&self) -> AppResult<Store> {
        Store::open(&self.settings)
    }

    fn now(&self) -> AppResult<DateTime<FixedOffset>> {
        self.settings.local_time(Utc::now())
    }

    /// Create or repair every canonical sheet. Safe to run any number of times.
    pub fn initialize_database(&self) -> AppResult<DatabaseInitialized> {
        let store = self.open_store()?;
        let mut sheets = BTreeMap::new();
        for kind in SheetKind::ALL {
            ensure_sheet(&store, kind.name(), kind.canonical_header())?;
            sheets.insert(kind.name().to_string(), store.sheet_url(kind.name()));
        }
        info!("Initialized {} sheets in {}", sheets.len(), store.url());
        Ok(DatabaseInitialized {
            document_url: store.url(),
            sheets,
        })
    }
}

/// Trimmed value of a required field, or a validation error naming it.
fn require<'a>(value: &'a str, field: &str) -> AppResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(AppError::missing(field))
    } else {
        Ok(value)
    }
}
