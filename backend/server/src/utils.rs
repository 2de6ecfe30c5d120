use chrono::Local;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const STORES: [&str; 6] = [
    "Palm Walk",
    "Palm Marina",
    "Palm City",
    "Garden",
    "Maurya Green",
    "ONE AMG",
];

pub fn timestamp() -> String {
    Local::now().format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Form fields arrive as strings or numbers depending on the input type. Keeps them as text so
/// parsing happens in one place.
pub fn raw_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

pub fn is_blank(field: &str) -> bool {
    field.trim().is_empty()
}
