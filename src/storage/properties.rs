// src/storage/properties.rs

use crate::error::AppResult;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Durable string key-value state kept outside the document.
pub trait PropertyStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

pub fn client_key(batch_id: &str) -> String {
    format!("CLIENT_{}", batch_id)
}

pub fn photos_key(batch_id: &str) -> String {
    format!("PHOTOS_{}", batch_id)
}

/// Properties as one pretty-printed JSON object on disk.
pub struct JsonPropertyStore {
    path: PathBuf,
}

impl JsonPropertyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> AppResult<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PropertyStore for JsonPropertyStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&map)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Stored property {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        assert_eq!(client_key("BATCH-1"), "CLIENT_BATCH-1");
        assert_eq!(photos_key("BATCH-1"), "PHOTOS_BATCH-1");
    }

    #[test]
    fn values_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("properties.json");
        JsonPropertyStore::new(&path).set("CLIENT_B", "Museum").unwrap();
        JsonPropertyStore::new(&path).set("PHOTOS_B", "Museum").unwrap();

        let reopened = JsonPropertyStore::new(&path);
        assert_eq!(reopened.get("CLIENT_B").unwrap().as_deref(), Some("Museum"));
        assert_eq!(reopened.get("PHOTOS_B").unwrap().as_deref(), Some("Museum"));
        assert_eq!(reopened.get("CLIENT_X").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("properties.json");
        fs::write(&path, "[1,2").unwrap();
        assert!(JsonPropertyStore::new(&path).get("k").is_err());
    }
}
