// src/storage/files.rs

use crate::error::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRef {
    pub id: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub id: String,
    pub url: String,
}

/// Binary object storage addressed by folder and file name.
pub trait FileStore {
    /// Find the folder called `name`, creating it on first reference.
    fn ensure_folder(&self, name: &str) -> AppResult<FolderRef>;
    /// Resolve a folder previously returned by [`FileStore::ensure_folder`].
    fn folder_by_id(&self, id: &str) -> AppResult<FolderRef>;
    fn create_file(&self, folder: &FolderRef, name: &str, bytes: &[u8]) -> AppResult<StoredFile>;
}

/// Folders are directories directly under `root`; a folder's id is its directory name.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Turn a free-text name into a single safe path component.
pub fn folder_name(raw: &str) -> String {
    let cleaned: String = raw
        .nfc()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim().trim_matches('.').trim();
    if cleaned.is_empty() {
        "Unnamed".to_string()
    } else {
        cleaned.to_string()
    }
}

impl FileStore for LocalFileStore {
    fn ensure_folder(&self, name: &str) -> AppResult<FolderRef> {
        let id = folder_name(name);
        let path = self.root.join(&id);
        if !path.is_dir() {
            // create_dir_all tolerates a concurrent creation of the same folder.
            fs::create_dir_all(&path)?;
            info!("Created folder {:?}", path);
        }
        Ok(FolderRef { id, path })
    }

    fn folder_by_id(&self, id: &str) -> AppResult<FolderRef> {
        if id != folder_name(id) {
            return Err(AppError::Storage(format!("Invalid folder id '{}'", id)));
        }
        let path = self.root.join(id);
        if !path.is_dir() {
            return Err(AppError::Storage(format!("Folder '{}' not found", id)));
        }
        Ok(FolderRef { id: id.to_string(), path })
    }

    fn create_file(&self, folder: &FolderRef, name: &str, bytes: &[u8]) -> AppResult<StoredFile> {
        let file_name = folder_name(name);
        let path = folder.path.join(&file_name);
        fs::write(&path, bytes)?;
        debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        let absolute = path.canonicalize().unwrap_or(path);
        Ok(StoredFile {
            id: format!("{}/{}", folder.id, file_name),
            url: format!("file://{}", absolute.display()),
        })
    }
}
