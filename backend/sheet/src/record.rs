use serde::{Deserialize, Serialize};

use crate::ledger::RequestItemLine;

pub const ISSUE_REQUESTS: &str = "Issue Requests";

/// Column order of the `Issue Requests` sheet.
pub const HEADERS: [&str; 16] = [
    "Timestamp",
    "Indent Number",
    "Store Name",
    "Requested By",
    "By Whom Orders",
    "Purpose",
    "Gate Pass",
    "Nature of Demand",
    "Project Name",
    "Store Required By Date",
    "Item Name",
    "Quantity",
    "A/U",
    "Remarks",
    "Current Stock",
    "Stock After Purchase",
];

/// Filled in once per indent, shared by every item line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestMetadata {
    pub indent_number: String,
    pub store_name: String,
    pub requested_by: String,
    pub by_whom_orders: String,
    pub purpose: String,
    pub gate_pass: String,
    pub nature_of_demand: String,
    pub project_name: String,
    pub store_required_by_date: String,
}

/// One persisted row: the indent metadata flattened with a single item line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub timestamp: String,
    pub indent_number: String,
    pub store_name: String,
    pub requested_by: String,
    pub by_whom_orders: String,
    pub purpose: String,
    #[serde(default)]
    pub gate_pass: String,
    pub nature_of_demand: String,
    pub project_name: String,
    pub store_required_by_date: String,
    pub item_name: String,
    pub quantity: i64,
    pub au: String,
    pub remarks: String,
    #[serde(default)]
    pub current_stock: i64,
    #[serde(default)]
    pub stock_after_purchase: i64,
}

impl SubmissionRecord {
    pub fn new(
        metadata: &RequestMetadata,
        timestamp: &str,
        indent_number: &str,
        line: &RequestItemLine,
    ) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            indent_number: indent_number.to_string(),
            store_name: metadata.store_name.clone(),
            requested_by: metadata.requested_by.clone(),
            by_whom_orders: metadata.by_whom_orders.clone(),
            purpose: metadata.purpose.clone(),
            gate_pass: metadata.gate_pass.clone(),
            nature_of_demand: metadata.nature_of_demand.clone(),
            project_name: metadata.project_name.clone(),
            store_required_by_date: metadata.store_required_by_date.clone(),
            item_name: line.item_name.clone(),
            quantity: line.quantity,
            au: line.au.clone(),
            remarks: line.remarks.clone(),
            current_stock: line.current_stock,
            stock_after_purchase: line.stock_after_purchase,
        }
    }

    /// Cells in [`HEADERS`] order.
    pub fn cells(&self) -> [String; 16] {
        [
            self.timestamp.clone(),
            self.indent_number.clone(),
            self.store_name.clone(),
            self.requested_by.clone(),
            self.by_whom_orders.clone(),
            self.purpose.clone(),
            self.gate_pass.clone(),
            self.nature_of_demand.clone(),
            self.project_name.clone(),
            self.store_required_by_date.clone(),
            self.item_name.clone(),
            self.quantity.to_string(),
            self.au.clone(),
            self.remarks.clone(),
            self.current_stock.to_string(),
            self.stock_after_purchase.to_string(),
        ]
    }
}
