//! # Sheet
//!
//! The spreadsheet the indent form writes into, plus the two pieces of logic that read it.
//!
//! ## Sheets
//! - `Master`: item name (**string**) to current stock (**int**). Read once per session as the ledger.
//! - `Issue Requests`: one row per requested item line. Column B holds the indent number.
//!
//! ## Backends
//! - [`RemoteSheet`]: the Apps Script web app deployed next to the spreadsheet. The script computes
//!   the next indent number itself.
//! - [`LocalSheet`]: an in-process workbook. Computes the next indent number from its own
//!   `Indent Number` column.
//!
//! Both backends allocate through the same contract in [`reference`]. Neither one makes allocation
//! atomic: two forms reading the sheet at the same time can be handed the same number.
use async_trait::async_trait;
use thiserror::Error;

pub mod ledger;
pub mod local;
pub mod record;
pub mod reference;
pub mod remote;

pub use ledger::{Ledger, MISCELLANEOUS, RequestItemLine};
pub use local::LocalSheet;
pub use record::{HEADERS, RequestMetadata, SubmissionRecord};
pub use reference::next_reference;
pub use remote::RemoteSheet;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Sheet unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Sheet rejected request: {0}")]
    Remote(String),

    #[error("Malformed sheet response: {0}")]
    Malformed(String),
}

/// Outcome of reading a user typed or sheet provided number.
///
/// Callers decide what a [`Parsed::Skip`] means: reference scans drop the entry, quantity fields
/// fall back to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed<T> {
    Value(T),
    Skip,
}

impl<T> Parsed<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Parsed::Value(value) => Some(value),
            Parsed::Skip => None,
        }
    }

    pub fn or(self, default: T) -> T {
        self.value().unwrap_or(default)
    }
}

#[async_trait]
pub trait Sheet: Send + Sync {
    async fn master_data(&self) -> Result<Ledger, SheetError>;

    async fn next_indent_number(&self) -> Result<String, SheetError>;

    /// Appends one row per record, in order.
    async fn append_rows(&self, rows: &[SubmissionRecord]) -> Result<(), SheetError>;
}
