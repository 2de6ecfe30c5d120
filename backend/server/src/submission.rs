//! # Submission
//!
//! ## Payload
//! ```json
//! {
//!   "metadata": { "storeName": "Palm Walk", "storeRequiredByDate": "2025-09-01", "indentNumber": "" },
//!   "lines": [{ "itemName": "PVC Item Name 4 25 MM", "quantity": "12", "au": "feet", "remarks": "" }]
//! }
//! ```
//!
//! ## Flow
//! - Presence checks run first, nothing is fetched or written for an invalid indent
//! - Blank indent number means the sheet allocates one
//! - Every line is priced against the same ledger snapshot and flattened with the metadata
//! - All rows go to the sheet in a single append
use serde::Deserialize;
use sheet::{RequestMetadata, SubmissionRecord};
use tracing::info;

use crate::{
    error::AppError,
    state::State,
    utils::{is_blank, raw_text, timestamp},
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineInput {
    pub item_name: String,
    #[serde(deserialize_with = "raw_text")]
    pub quantity: String,
    pub au: String,
    pub remarks: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionRequest {
    pub metadata: RequestMetadata,
    pub lines: Vec<LineInput>,
}

impl SubmissionRequest {
    /// Names of the missing required fields, in form order.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if is_blank(&self.metadata.store_name) {
            missing.push("Store Name".to_string());
        }
        if is_blank(&self.metadata.store_required_by_date) {
            missing.push("Store Required By Date".to_string());
        }
        if self.lines.is_empty() {
            missing.push("Item".to_string());
        }

        for (index, line) in self.lines.iter().enumerate() {
            if is_blank(&line.item_name) {
                missing.push(format!("Item Name (line {})", index + 1));
            }
            if is_blank(&line.quantity) {
                missing.push(format!("Quantity (line {})", index + 1));
            }
        }

        missing
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let missing = self.missing_fields();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(missing))
        }
    }
}

/// Validates and appends one row per line. Returns the indent number and the rows written.
pub async fn submit(
    state: &State,
    request: SubmissionRequest,
) -> Result<(String, Vec<SubmissionRecord>), AppError> {
    request.validate()?;

    let indent_number = if is_blank(&request.metadata.indent_number) {
        state.next_indent().await
    } else {
        request.metadata.indent_number.trim().to_string()
    };
    let timestamp = timestamp();
    let snapshot = state.snapshot().await;

    let records: Vec<SubmissionRecord> = request
        .lines
        .iter()
        .map(|line| {
            let line = snapshot.line(&line.item_name, &line.quantity, &line.au, &line.remarks);
            SubmissionRecord::new(&request.metadata, &timestamp, &indent_number, &line)
        })
        .collect();

    state.sheet.append_rows(&records).await?;
    info!(
        "Submitted {indent_number} for {} with {} lines",
        request.metadata.store_name,
        records.len()
    );

    Ok((indent_number, records))
}
