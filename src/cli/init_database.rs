// src/cli/init_database.rs

use super::print_json;
use crate::assessment::AssessmentService;
use crate::error::AppResult;

pub fn run(service: &AssessmentService) -> AppResult<()> {
    print_json(&service.initialize_database()?)
}
