//! In-process workbook used when no Apps Script deployment is configured, and by tests.
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    HEADERS, Ledger, Sheet, SheetError, SubmissionRecord, next_reference, record::ISSUE_REQUESTS,
};

/// `Master` rows a fresh workbook is seeded with.
pub const SAMPLE_MASTER: [(&str, i64); 26] = [
    ("Name\n(B-C-D)", 10),
    ("CATEGORY 1 Item Name 1 6*4 MM", 20),
    ("CATEGORY 1 Item Name 2 90 MM", 30),
    ("CATEGORY 1 Item Name 3 50*32 MM", 40),
    ("PVC Item Name 4 25 MM", 50),
    ("PVC Item Name 5 32 MM", 60),
    ("CATEGORY 3 Item Name 6 90 MM", 70),
    ("CATEGORY 3 Item Name 7 6*4\"", 80),
    ("CATEGORY 3 Item Name 8 90 MM", 90),
    ("PVC Item Name 9 50*32 MM", 100),
    ("PVC Item Name 10 25 MM", 110),
    ("PVC Item Name 11 32 MM", 120),
    ("PVC Item Name 12 90 MM", 130),
    ("PVC Item Name 13 6*4\"", 140),
    ("CATEGORY 3 Item Name 14 90 MM", 150),
    ("CATEGORY 3 Item Name 15 50*32 MM", 160),
    ("CATEGORY 3 Item Name 16 25 MM", 170),
    ("CATEGORY 3 Item Name 17 32 MM", 180),
    ("CATEGORY 3 Item Name 18 90 MM", 190),
    ("CATEGORY 4 Item Name 19 6*4\"", 200),
    ("CATEGORY 4 Item Name 20 90 MM", 210),
    ("CATEGORY 4 Item Name 21 50*32 MM", 220),
    ("CATEGORY 4 Item Name 22 25 MM", 230),
    ("CATEGORY 1 Item Name 23 32 MM", 240),
    ("CATEGORY 1 Item Name 24 90 MM", 250),
    ("CATEGORY 1 SKU NAME 88 MM", 260),
];

#[derive(Default)]
pub struct LocalSheet {
    master: Ledger,
    requests: Mutex<Option<Vec<SubmissionRecord>>>,
}

impl LocalSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_master<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        Self {
            master: Ledger::from_rows(rows),
            ..Default::default()
        }
    }

    pub fn with_sample_master() -> Self {
        Self::with_master(SAMPLE_MASTER)
    }

    pub async fn rows(&self) -> Vec<SubmissionRecord> {
        self.requests.lock().await.clone().unwrap_or_default()
    }

    pub async fn row_count(&self) -> usize {
        self.requests.lock().await.as_ref().map_or(0, Vec::len)
    }

    /// `Issue Requests` as cells, header row first. Empty until the first append creates the
    /// sheet.
    pub async fn table(&self) -> Vec<Vec<String>> {
        let requests = self.requests.lock().await;
        let Some(rows) = requests.as_ref() else {
            return Vec::new();
        };

        let mut table = vec![HEADERS.iter().map(|h| h.to_string()).collect()];
        table.extend(rows.iter().map(|row| row.cells().to_vec()));
        table
    }
}

#[async_trait]
impl Sheet for LocalSheet {
    async fn master_data(&self) -> Result<Ledger, SheetError> {
        Ok(self.master.clone())
    }

    async fn next_indent_number(&self) -> Result<String, SheetError> {
        let requests = self.requests.lock().await;
        let indent_numbers = requests
            .iter()
            .flatten()
            .map(|row| row.indent_number.as_str());

        Ok(next_reference(indent_numbers))
    }

    async fn append_rows(&self, rows: &[SubmissionRecord]) -> Result<(), SheetError> {
        let mut requests = self.requests.lock().await;

        let sheet = requests.get_or_insert_with(|| {
            info!("Creating {ISSUE_REQUESTS} sheet");
            Vec::new()
        });
        sheet.extend_from_slice(rows);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RequestMetadata, reference::DEFAULT_REFERENCE};

    fn rows(indent_number: &str, items: &[&str]) -> Vec<SubmissionRecord> {
        let ledger = Ledger::from_rows(SAMPLE_MASTER);

        items
            .iter()
            .map(|item| {
                SubmissionRecord::new(
                    &RequestMetadata::default(),
                    "now",
                    indent_number,
                    &ledger.line(item, 1, "pieces", ""),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_sample_master() {
        let sheet = LocalSheet::with_sample_master();
        let ledger = sheet.master_data().await.unwrap();

        assert_eq!(ledger.len(), SAMPLE_MASTER.len());
        assert_eq!(ledger.current_stock("PVC Item Name 4 25 MM"), 50);
        assert!(LocalSheet::new().master_data().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_next_indent_number() {
        let sheet = LocalSheet::new();
        assert_eq!(sheet.next_indent_number().await.unwrap(), DEFAULT_REFERENCE);

        sheet
            .append_rows(&rows("I-001", &["PVC Item Name 4 25 MM", "PVC Item Name 5 32 MM"]))
            .await
            .unwrap();
        sheet.append_rows(&rows("I-002", &["PVC Item Name 4 25 MM"])).await.unwrap();

        assert_eq!(sheet.next_indent_number().await.unwrap(), "I-003");
        assert_eq!(sheet.row_count().await, 3);
    }

    #[tokio::test]
    async fn test_table() {
        let sheet = LocalSheet::new();
        assert!(sheet.table().await.is_empty());

        sheet.append_rows(&[]).await.unwrap();
        assert_eq!(sheet.table().await, vec![HEADERS.map(String::from).to_vec()]);

        sheet.append_rows(&rows("I-001", &["PVC Item Name 5 32 MM"])).await.unwrap();
        let table = sheet.table().await;

        assert_eq!(table.len(), 2);
        assert_eq!(table[1][1], "I-001");
        assert_eq!(table[1][15], "59");
    }
}
