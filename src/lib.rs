// src/lib.rs

pub mod assessment;
pub mod cli;
pub mod error;
pub mod settings;
pub mod sheets;
pub mod storage;

pub use assessment::AssessmentService;
pub use error::{AppError, AppResult};
pub use settings::AppSettings;
