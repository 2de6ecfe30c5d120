//! # Ledger
//!
//! Snapshot of the `Master` sheet: item names in sheet order and their current stock.
//!
//! ## Wire Shape
//! ```json
//! { "itemNames": ["PVC Item Name 4 25 MM"], "stockData": { "PVC Item Name 4 25 MM": 50 } }
//! ```
//! Stock cells come straight from the spreadsheet, so numbers, numeric strings and blanks all show
//! up. Anything that is not a number counts as zero stock.
//!
//! ## Stock After Purchase
//! - Known item: current stock minus the requested quantity
//! - Unknown item: zero minus the requested quantity
//! - `Miscellaneous`: never looked up, current and after are both zero
//!
//! The ledger is only ever a point-in-time read. Submitting a request does not decrement it.
use std::collections::{HashMap, hash_map::Entry};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Parsed;

pub const MISCELLANEOUS: &str = "Miscellaneous";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawLedger")]
pub struct Ledger {
    pub item_names: Vec<String>,
    pub stock_data: HashMap<String, i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLedger {
    #[serde(default)]
    item_names: Vec<String>,
    #[serde(default)]
    stock_data: HashMap<String, Value>,
}

impl From<RawLedger> for Ledger {
    fn from(raw: RawLedger) -> Self {
        let stock: HashMap<String, i64> = raw
            .stock_data
            .iter()
            .map(|(name, cell)| (name.trim().to_string(), stock_cell(cell).or(0)))
            .collect();

        let mut ledger = Ledger::from_rows(raw.item_names.into_iter().map(|name| {
            let current = stock.get(name.trim()).copied().unwrap_or(0);
            (name, current)
        }));

        let mut orphans: Vec<(String, i64)> = stock
            .into_iter()
            .filter(|(name, _)| !ledger.stock_data.contains_key(name))
            .collect();
        orphans.sort();

        for (name, current) in orphans {
            if !name.is_empty() {
                ledger.item_names.push(name.clone());
                ledger.stock_data.insert(name, current);
            }
        }

        ledger
    }
}

/// One line of an indent as shown on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItemLine {
    pub item_name: String,
    pub quantity: i64,
    pub au: String,
    pub remarks: String,
    pub current_stock: i64,
    pub stock_after_purchase: i64,
}

impl Ledger {
    /// Builds a ledger from `Master` rows. Names are trimmed, blank names are dropped, and a name
    /// appearing twice keeps its first position with the last stock value.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut ledger = Ledger::default();

        for (name, current) in rows {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }

            match ledger.stock_data.entry(name.to_string()) {
                Entry::Vacant(entry) => {
                    ledger.item_names.push(entry.key().clone());
                    entry.insert(current);
                }
                Entry::Occupied(mut entry) => {
                    entry.insert(current);
                }
            }
        }

        ledger
    }

    pub fn len(&self) -> usize {
        self.item_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_names.is_empty()
    }

    pub fn current_stock(&self, item_name: &str) -> i64 {
        current_stock(self, item_name)
    }

    pub fn stock_after(&self, item_name: &str, quantity: i64) -> i64 {
        stock_after(self, item_name, quantity)
    }

    pub fn line(&self, item_name: &str, quantity: i64, au: &str, remarks: &str) -> RequestItemLine {
        RequestItemLine {
            item_name: item_name.to_string(),
            quantity,
            au: au.to_string(),
            remarks: remarks.to_string(),
            current_stock: self.current_stock(item_name),
            stock_after_purchase: self.stock_after(item_name, quantity),
        }
    }
}

pub fn current_stock(ledger: &Ledger, item_name: &str) -> i64 {
    if item_name == MISCELLANEOUS {
        return 0;
    }

    ledger.stock_data.get(item_name).copied().unwrap_or(0)
}

pub fn stock_after(ledger: &Ledger, item_name: &str, quantity: i64) -> i64 {
    if item_name == MISCELLANEOUS {
        return 0;
    }

    current_stock(ledger, item_name).saturating_sub(quantity)
}

/// Quantity fields are free text. Blank, non-numeric or out of range input is a skip, fractional
/// input is truncated.
pub fn parse_quantity(raw: &str) -> Parsed<i64> {
    let raw = raw.trim();

    if let Ok(quantity) = raw.parse::<i64>() {
        return Parsed::Value(quantity);
    }

    match raw.parse::<f64>() {
        Ok(quantity) if in_range(quantity) => Parsed::Value(quantity.trunc() as i64),
        _ => Parsed::Skip,
    }
}

fn in_range(quantity: f64) -> bool {
    quantity.is_finite() && quantity >= i64::MIN as f64 && quantity < i64::MAX as f64
}

pub fn stock_cell(cell: &Value) -> Parsed<i64> {
    match cell {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|n| in_range(*n))
                    .map(|n| n.trunc() as i64)
            })
            .map_or(Parsed::Skip, Parsed::Value),
        Value::String(raw) => parse_quantity(raw),
        _ => Parsed::Skip,
    }
}
