// src/cli/new_batch.rs

use super::print_json;
use crate::assessment::AssessmentService;
use crate::error::AppResult;

pub fn run(service: &AssessmentService, client: &str, assessor: &str) -> AppResult<()> {
    print_json(&service.new_batch(client, assessor)?)
}
