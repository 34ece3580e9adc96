//! Decoding helpers for the loosely-typed value payloads the backing
//! services hand back.

use serde_json::Value;

/// Devices historically reported payloads with single-quoted keys and
/// strings. A blind quote swap is enough to feed them to a JSON
/// parser; payloads with embedded apostrophes fail to parse and are
/// handled by the callers' fallbacks.
pub(crate) fn normalize_quotes(raw: &str) -> String {
    raw.replace('\'', "\"")
}

/// Parses a (possibly single-quoted) JSON payload and re-serializes it
/// canonically.
pub(crate) fn reserialize_json(raw: &str) -> Option<String> {
    let value: Value = serde_json::from_str(&normalize_quotes(raw)).ok()?;
    serde_json::to_string(&value).ok()
}

/// Extracts the first reported value from a `{"values": [{...}]}`
/// payload.
pub(crate) fn first_reported_value(payload: &str) -> Option<Value> {
    let parsed: Value = serde_json::from_str(&normalize_quotes(payload)).ok()?;
    parsed.get("values")?.get(0)?.get("value").cloned()
}

/// Formats a numeric value (stored as a number or a numeric string)
/// with two decimal places.
pub(crate) fn format_two_decimals(value: &Value) -> Option<String> {
    let number = match value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        other => other.as_f64()?,
    };
    Some(format!("{number:.2}"))
}

/// Stored values are usually text; anything else is serialized as-is.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
