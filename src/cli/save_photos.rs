// src/cli/save_photos.rs

use super::{print_json, read_json_input};
use crate::assessment::{AssessmentService, PhotoPayload};
use crate::error::AppResult;
use std::path::Path;

pub fn run(service: &AssessmentService, batch_id: &str, item_id: &str, payload: &Path) -> AppResult<()> {
    let photos: Vec<PhotoPayload> = read_json_input(payload)?;
    print_json(&service.save_photos_data_urls(batch_id, item_id, &photos)?)
}
