// src/cli/save_item.rs

use super::{print_json, read_json_input};
use crate::assessment::{AssessmentService, ItemPayload};
use crate::error::AppResult;
use std::path::Path;

pub fn run(service: &AssessmentService, payload: &Path) -> AppResult<()> {
    let payload: ItemPayload = read_json_input(payload)?;
    print_json(&service.save_item(&payload)?)
}
