//! Lenient decoding for documents written by the upstream pipeline.
//!
//! The pipeline is not strict about types: counts sometimes arrive as strings
//! (`"120"`) and averages occasionally as integers. These helpers apply the
//! same rules as JavaScript's `Number(x)` so the API and the dashboard agree
//! on what a field is worth. `None` stands for `NaN`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a string the way `Number(string)` does.
///
/// Surrounding whitespace is ignored and an empty string is `0`. Decimal,
/// exponent, `0x`/`0o`/`0b` prefixed and `Infinity` forms are accepted;
/// anything else is `None`.
pub fn parse_numeric_str(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    // f64::from_str also accepts "inf" and "nan", which Number() rejects.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

/// `Number(value)` for a JSON value.
pub fn js_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Non-negative whole count; anything unusable falls back to `0`.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match js_number(&value) {
        Some(n) if n.is_finite() && n > 0.0 => n.round() as u64,
        _ => 0,
    })
}

/// Floating point metric; unparsable input becomes `NaN`.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(js_number(&value).unwrap_or(f64::NAN))
}

/// Free text; `null` becomes the empty string and scalars are stringified.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(stringify(value).unwrap_or_default())
}

/// Optional text; `null` is `None` and scalars are stringified.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(stringify(value))
}

pub fn nan() -> f64 {
    f64::NAN
}

fn stringify(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
