// src/assessment/batch.rs

use super::{ids, require, AssessmentService, BatchCreated};
use crate::error::AppResult;
use crate::sheets::database::append_record;
use crate::sheets::{Record, SheetKind};
use crate::storage::{client_key, photos_key};
use tracing::info;

pub const OPEN_STATUS: &str = "Open";

impl AssessmentService {
    /// Start a batch for `client`, resolve the client's photo folder and remember both
    /// against the new batch id for later photo uploads.
    pub fn new_batch(&self, client: &str, assessor_name: &str) -> AppResult<BatchCreated> {
        let client = require(client, "client")?;
        let assessor = require(assessor_name, "assessorName")?;

        let now = self.now()?;
        let batch_id = ids::batch_id(&now);

        let store = self.open_store()?;
        let record = Record::new()
            .with("BatchID", batch_id.as_str())
            .with("Client", client)
            .with("StartDate", now.format("%Y-%m-%d").to_string())
            .with("Assessor", assessor)
            .with("Status", OPEN_STATUS);
        let row = append_record(&store, SheetKind::Batches, &record)?;

        let folder = self.files.ensure_folder(client)?;
        self.properties.set(&client_key(&batch_id), client)?;
        self.properties.set(&photos_key(&batch_id), &folder.id)?;

        info!("Created batch {} for '{}' on row {}", batch_id, client, row);
        Ok(BatchCreated {
            batch_id,
            client_folder_id: folder.id,
        })
    }
}
