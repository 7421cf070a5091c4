// src/error.rs

use thiserror::Error;

/// Error taxonomy shared by the store, the file backends and the record builders.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Missing required field: {0}")]
    Validation(String),
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn missing(field: &str) -> Self {
        AppError::Validation(field.to_string())
    }

    /// Storage-level failures, whether raised here or by a backend.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::Storage(_) | AppError::Sqlite(_) | AppError::Io(_) | AppError::Json(_)
        )
    }
}
