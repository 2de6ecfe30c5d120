use std::sync::Arc;

use chrono::{DateTime, Local};
use sheet::{
    Ledger, LocalSheet, RemoteSheet, RequestItemLine, Sheet, ledger::parse_quantity,
    reference::DEFAULT_REFERENCE,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::config::Config;

/// What the form reads from the spreadsheet, frozen at `loaded_at`.
pub struct Snapshot {
    pub ledger: Ledger,
    pub loaded_at: DateTime<Local>,
}

impl Snapshot {
    /// Prices a form line against this snapshot. Unparseable quantities count as zero.
    pub fn line(
        &self,
        item_name: &str,
        raw_quantity: &str,
        au: &str,
        remarks: &str,
    ) -> RequestItemLine {
        let quantity = parse_quantity(raw_quantity).or(0);

        self.ledger.line(item_name.trim(), quantity, au, remarks)
    }
}

pub struct State {
    pub config: Config,
    pub sheet: Arc<dyn Sheet>,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl State {
    pub async fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let sheet: Arc<dyn Sheet> = match &config.sheet_url {
            Some(url) => {
                info!("Using Apps Script sheet at {url}");
                Arc::new(RemoteSheet::new(url.as_str(), config.sheet_timeout)?)
            }
            None if config.seed_sample => {
                info!("Using local workbook with sample master data");
                Arc::new(LocalSheet::with_sample_master())
            }
            None => {
                info!("Using empty local workbook");
                Arc::new(LocalSheet::new())
            }
        };

        Ok(Self::with_sheet(config, sheet).await)
    }

    pub async fn with_sheet(config: Config, sheet: Arc<dyn Sheet>) -> Arc<Self> {
        let snapshot = load_snapshot(sheet.as_ref()).await;

        Arc::new(Self {
            config,
            sheet,
            snapshot: RwLock::new(Arc::new(snapshot)),
        })
    }

    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    /// Re-reads the master sheet and swaps the snapshot in one step. Readers holding the old
    /// snapshot keep it until they drop it.
    pub async fn refresh(&self) -> Arc<Snapshot> {
        let snapshot = Arc::new(load_snapshot(self.sheet.as_ref()).await);
        *self.snapshot.write().await = snapshot.clone();

        snapshot
    }

    /// Next indent number according to the sheet, `I-001` when the sheet cannot be asked.
    pub async fn next_indent(&self) -> String {
        match self.sheet.next_indent_number().await {
            Ok(reference) => reference,
            Err(e) => {
                warn!("Failed to fetch next indent number, using {DEFAULT_REFERENCE}: {e}");
                DEFAULT_REFERENCE.to_string()
            }
        }
    }

    /// Previews a form line against the current snapshot.
    pub async fn line(
        &self,
        item_name: &str,
        raw_quantity: &str,
        au: &str,
        remarks: &str,
    ) -> RequestItemLine {
        self.snapshot()
            .await
            .line(item_name, raw_quantity, au, remarks)
    }
}

async fn load_snapshot(sheet: &dyn Sheet) -> Snapshot {
    let ledger = match sheet.master_data().await {
        Ok(ledger) => {
            info!("Loaded {} master items", ledger.len());
            ledger
        }
        Err(e) => {
            warn!("Failed to fetch master data, using empty ledger: {e}");
            Ledger::default()
        }
    };

    Snapshot {
        ledger,
        loaded_at: Local::now(),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use sheet::{SheetError, SubmissionRecord};

    use super::*;

    struct Unreachable;

    #[async_trait]
    impl Sheet for Unreachable {
        async fn master_data(&self) -> Result<Ledger, SheetError> {
            Err(SheetError::Remote("Error: offline".to_string()))
        }

        async fn next_indent_number(&self) -> Result<String, SheetError> {
            Err(SheetError::Remote("Error: offline".to_string()))
        }

        async fn append_rows(&self, _rows: &[SubmissionRecord]) -> Result<(), SheetError> {
            Err(SheetError::Remote("Error: offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_fallbacks() {
        let state = State::with_sheet(Config::default(), Arc::new(Unreachable)).await;

        assert!(state.snapshot().await.ledger.is_empty());
        assert_eq!(state.next_indent().await, "I-001");
        assert_eq!(state.line("Widget", "3", "pieces", "").await.stock_after_purchase, -3);
    }

    #[tokio::test]
    async fn test_line() {
        let sheet = Arc::new(LocalSheet::with_master([("Pipe 25mm", 50)]));
        let state = State::with_sheet(Config::default(), sheet).await;

        let line = state.line(" Pipe 25mm ", "12", "feet", "").await;
        assert_eq!(line.item_name, "Pipe 25mm");
        assert_eq!(line.current_stock, 50);
        assert_eq!(line.stock_after_purchase, 38);

        let line = state.line("Pipe 25mm", "twelve", "feet", "").await;
        assert_eq!(line.quantity, 0);
        assert_eq!(line.stock_after_purchase, 50);
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let sheet = Arc::new(LocalSheet::with_sample_master());
        let state = State::with_sheet(Config::default(), sheet).await;
        let before = state.snapshot().await;
        let after = state.refresh().await;

        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after, &state.snapshot().await));
        assert_eq!(before.ledger, after.ledger);
    }
}
