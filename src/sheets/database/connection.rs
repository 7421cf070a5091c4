// src/sheets/database/connection.rs

use crate::error::{AppError, AppResult};
use crate::settings::AppSettings;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const AMBIENT_DOCUMENT_NAME: &str = "Assessments.db";

/// An open document. Never cached between operations; every operation calls
/// [`Store::open`] again.
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Resolve the configured document, or fall back to the ambient document in the
    /// data directory.
    pub fn open(settings: &AppSettings) -> AppResult<Self> {
        match settings.document.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => {
                let path = PathBuf::from(id);
                if !path.is_file() {
                    return Err(AppError::Configuration(format!(
                        "Configured document '{}' does not exist",
                        path.display()
                    )));
                }
                Self::open_path(&path)
            }
            _ => {
                let data_dir = settings.resolve_data_dir().ok_or_else(|| {
                    AppError::Configuration(
                        "No document configured and no data directory could be determined".into(),
                    )
                })?;
                std::fs::create_dir_all(&data_dir).map_err(|e| {
                    AppError::Configuration(format!(
                        "Cannot create data directory {}: {}",
                        data_dir.display(),
                        e
                    ))
                })?;
                Self::open_path(&data_dir.join(AMBIENT_DOCUMENT_NAME))
            }
        }
    }

    fn open_path(path: &Path) -> AppResult<Self> {
        let conn = Connection::open(path)?;

        // PRAGMA settings are per connection, so they are applied on every open.
        let journal_mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        if journal_mode.to_uppercase() != "WAL" {
            warn!(
                "Failed to set WAL mode on document {:?}. Current mode: {}",
                path.file_name(),
                journal_mode
            );
        } else {
            debug!("WAL mode activated for document {:?}", path.file_name());
        }
        conn.execute_batch(
            "PRAGMA synchronous=NORMAL;
             PRAGMA busy_timeout=5000;",
        )?;

        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Ok(Self { conn, path: Some(path) })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: None,
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn url(&self) -> String {
        match &self.path {
            Some(path) => format!("file://{}", path.display()),
            None => "file::memory:".to_string(),
        }
    }

    pub fn sheet_url(&self, sheet_name: &str) -> String {
        format!("{}#table={}", self.url(), sheet_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_document_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            document: Some(dir.path().join("nope.db").display().to_string()),
            ..AppSettings::default()
        };
        assert!(matches!(Store::open(&settings), Err(AppError::Configuration(_))));
    }

    #[test]
    fn blank_document_falls_back_to_ambient() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            document: Some("   ".into()),
            data_dir: Some(dir.path().join("data")),
            ..AppSettings::default()
        };
        let store = Store::open(&settings).unwrap();
        assert!(store.path().unwrap().ends_with(AMBIENT_DOCUMENT_NAME));
        assert!(dir.path().join("data").is_dir());
        assert!(store.url().starts_with("file://"));
        assert!(store.sheet_url("Items").ends_with("#table=Items"));
    }

    #[test]
    fn configured_document_is_opened_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("custom.db");
        std::fs::write(&doc, b"").unwrap();
        let settings = AppSettings {
            document: Some(doc.display().to_string()),
            ..AppSettings::default()
        };
        let store = Store::open(&settings).unwrap();
        assert_eq!(store.path().unwrap(), doc.canonicalize().unwrap());
    }
}
