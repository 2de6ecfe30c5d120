//! # Apps Script
//!
//! The spreadsheet is fronted by an Apps Script web app deployed as `.../exec`.
//!
//! ## Endpoints
//! - `GET ?action=getMasterData`: JSON ledger
//! - `GET ?action=getNextIndentNumber`: plain text indent number, computed by the script
//! - `POST`: form field `submissionData` holding a JSON array of rows
//!
//! The script answers `Error: ...` as a plain text body, usually with a 200. Status codes are
//! not inspected, only the body.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{Ledger, Parsed, Sheet, SheetError, SubmissionRecord, reference::parse_reference};

const ERROR_PREFIX: &str = "Error";

pub struct RemoteSheet {
    client: Client,
    url: String,
}

impl RemoteSheet {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SheetError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn action(&self, action: &str) -> Result<String, SheetError> {
        debug!("Calling sheet action {action}");

        let body = self
            .client
            .get(&self.url)
            .query(&[("action", action)])
            .send()
            .await?
            .text()
            .await?;

        Ok(body)
    }
}

#[async_trait]
impl Sheet for RemoteSheet {
    async fn master_data(&self) -> Result<Ledger, SheetError> {
        parse_master_data(&self.action("getMasterData").await?)
    }

    async fn next_indent_number(&self) -> Result<String, SheetError> {
        parse_indent_number(&self.action("getNextIndentNumber").await?)
    }

    async fn append_rows(&self, rows: &[SubmissionRecord]) -> Result<(), SheetError> {
        let submission_data =
            serde_json::to_string(rows).map_err(|e| SheetError::Malformed(e.to_string()))?;

        let body = self
            .client
            .post(&self.url)
            .form(&[("submissionData", submission_data)])
            .send()
            .await?
            .text()
            .await?;

        parse_submit_response(&body)
    }
}

fn rejected(body: &str) -> Option<SheetError> {
    let body = body.trim();

    body.starts_with(ERROR_PREFIX)
        .then(|| SheetError::Remote(body.to_string()))
}

pub fn parse_master_data(body: &str) -> Result<Ledger, SheetError> {
    if let Some(error) = rejected(body) {
        return Err(error);
    }

    serde_json::from_str(body).map_err(|e| SheetError::Malformed(e.to_string()))
}

pub fn parse_indent_number(body: &str) -> Result<String, SheetError> {
    let reference = body.trim();

    match parse_reference(reference) {
        Parsed::Value(_) => Ok(reference.to_string()),
        Parsed::Skip => Err(rejected(body)
            .unwrap_or_else(|| SheetError::Malformed(reference.to_string()))),
    }
}

pub fn parse_submit_response(body: &str) -> Result<(), SheetError> {
    match rejected(body) {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
