//! Indent numbers: `I-001`, `I-002`, ... `I-999`, `I-1000`.
use crate::Parsed;

pub const PREFIX: &str = "I";
pub const DEFAULT_REFERENCE: &str = "I-001";

const MIN_DIGITS: usize = 3;

/// Reads the numeric suffix of an indent number. Anything that is not `I-` followed by digits is
/// skipped, including suffixes too large to count.
pub fn parse_reference(raw: &str) -> Parsed<u64> {
    let Some(digits) = raw
        .trim()
        .strip_prefix(PREFIX)
        .and_then(|rest| rest.strip_prefix('-'))
    else {
        return Parsed::Skip;
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Parsed::Skip;
    }

    digits.parse().map_or(Parsed::Skip, Parsed::Value)
}

pub fn format_reference(number: u64) -> String {
    format!("{PREFIX}-{number:0>width$}", width = MIN_DIGITS)
}

/// Next unused indent number after the highest one in `existing`.
///
/// Order does not matter and malformed entries are ignored, so an empty or garbage-only column
/// yields `I-001`.
pub fn next_reference<I, S>(existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let max = existing
        .into_iter()
        .filter_map(|reference| parse_reference(reference.as_ref()).value())
        .max()
        .unwrap_or(0);

    format_reference(max.saturating_add(1))
}
