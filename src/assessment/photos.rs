// src/assessment/photos.rs

use super::{ids, require, AssessmentService, PhotoPayload, PhotosSaved};
use crate::error::{AppError, AppResult};
use crate::sheets::database::{ensure_sheet, next_free_row, write_record, SheetHandle};
use crate::sheets::{Record, SheetKind};
use crate::storage::{client_key, photos_key, FolderRef};
use base64::Engine as _;
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Split a `data:image/<subtype>;base64,<content>` URL into subtype and content.
pub fn parse_image_data_url(data_url: &str) -> Option<(&str, &str)> {
    static DATA_URL_RE: OnceLock<Regex> = OnceLock::new();
    let re = DATA_URL_RE.get_or_init(|| {
        Regex::new(r"(?s)^data:image/([A-Za-z0-9.+-]+);base64,(.+)$").expect("valid data URL regex")
    });
    let caps = re.captures(data_url.trim())?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

pub fn extension_for(subtype: &str) -> String {
    match subtype.to_ascii_lowercase().as_str() {
        "jpeg" | "pjpeg" => "jpg".to_string(),
        "svg+xml" => "svg".to_string(),
        other => other.chars().filter(|c| c.is_ascii_alphanumeric()).collect(),
    }
}

fn decode_base64(content: &str) -> AppResult<Vec<u8>> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| AppError::Storage(format!("Invalid base64 image data: {}", e)))
}

impl AssessmentService {
    /// Store every well-formed image data URL as a file in the batch's photo folder and
    /// add a Photos row for it. Malformed entries are skipped; decode or storage failures
    /// are logged and skipped. The count only includes photos that were fully saved.
    pub fn save_photos_data_urls(
        &self,
        batch_id: &str,
        item_id: &str,
        photos: &[PhotoPayload],
    ) -> AppResult<PhotosSaved> {
        let batch_id = require(batch_id, "batchId")?;
        let item_id = require(item_id, "itemId")?;

        let now = self.now()?;
        let store = self.open_store()?;
        let sheet = ensure_sheet(&store, SheetKind::Photos.name(), SheetKind::Photos.canonical_header())?;

        let folder = match self.photo_folder(batch_id) {
            Ok(folder) => folder,
            Err(e) => {
                warn!("No photo folder for batch {}: {}", batch_id, e);
                return Ok(PhotosSaved { saved: 0 });
            }
        };

        let mut saved = 0;
        for (index, photo) in photos.iter().enumerate() {
            let Some((subtype, content)) = parse_image_data_url(&photo.data_url) else {
                debug!("Skipping photo {} for item {}: not an image data URL", index, item_id);
                continue;
            };
            match self.save_one_photo(&sheet, &folder, item_id, subtype, content, photo, &now) {
                Ok(photo_id) => {
                    debug!("Saved photo {} for item {}", photo_id, item_id);
                    saved += 1;
                }
                Err(e) => warn!("Failed to save photo {} for item {}: {}", index, item_id, e),
            }
        }

        info!("Saved {}/{} photos for item {} in batch {}", saved, photos.len(), item_id, batch_id);
        Ok(PhotosSaved { saved })
    }

    /// The folder recorded for the batch, falling back to the client's folder (and
    /// remembering it) when only the client is known.
    fn photo_folder(&self, batch_id: &str) -> AppResult<FolderRef> {
        if let Some(id) = self.properties.get(&photos_key(batch_id))? {
            match self.files.folder_by_id(&id) {
                Ok(folder) => return Ok(folder),
                Err(e) => warn!("Recorded photo folder '{}' for {} is unusable: {}", id, batch_id, e),
            }
        }
        let client = self
            .properties
            .get(&client_key(batch_id))?
            .ok_or_else(|| AppError::Configuration(format!("Unknown batch '{}'", batch_id)))?;
        let folder = self.files.ensure_folder(&client)?;
        self.properties.set(&photos_key(batch_id), &folder.id)?;
        Ok(folder)
    }

    #[allow(clippy::too_many_arguments)]
    fn save_one_photo(
        &self,
        sheet: &SheetHandle<'_>,
        folder: &FolderRef,
        item_id: &str,
        subtype: &str,
        content: &str,
        photo: &PhotoPayload,
        now: &DateTime<FixedOffset>,
    ) -> AppResult<String> {
        let bytes = decode_base64(content)?;
        let photo_id = ids::photo_id();
        let file_name = format!("{}_{}.{}", item_id, photo_id, extension_for(subtype));
        let stored = self.files.create_file(folder, &file_name, &bytes)?;

        let taken_at = if photo.taken_at.trim().is_empty() {
            now.format("%Y-%m-%d %H:%M:%S").to_string()
        } else {
            photo.taken_at.trim().to_string()
        };
        let uploader = photo
            .uploader
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .unwrap_or_else(whoami::username);

        let record = Record::new()
            .with("PhotoID", photo_id.as_str())
            .with("ItemID", item_id)
            .with("Image", stored.url)
            .with("Caption", photo.caption.as_str())
            .with("TakenAt", taken_at)
            .with("Lat", photo.lat)
            .with("Lng", photo.lng)
            .with("Uploader", uploader);
        let row = next_free_row(sheet, SheetKind::Photos.key_column())?;
        write_record(sheet, row, &record)?;
        Ok(photo_id)
    }
}
