// src/storage/mod.rs
// Collaborators outside the tabular store: file blobs and durable properties.

pub mod files;
pub mod properties;

pub use files::{FileStore, FolderRef, LocalFileStore, StoredFile};
pub use properties::{client_key, photos_key, JsonPropertyStore, PropertyStore};
