//! BSON to JSON rendering.
//!
//! Documents leave the gateway looking the way the driver values looked when
//! the old Node service passed them through `JSON.stringify`: ObjectIds as hex
//! strings, dates as ISO-8601 with milliseconds, integral doubles as plain
//! integers and non-finite numbers as `null`. Field order is preserved.

use chrono::{SecondsFormat, TimeZone, Utc};
use mongodb::bson::{Bson, Decimal128, Document};
use serde_json::{Map, Number, Value};
use wellbeing_common::lenient::parse_numeric_str;

/// Largest integer a JavaScript number represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

/// Render a document with `fields` passed through [`coerce_numeric`].
///
/// Coerced fields that are absent from the document are emitted as `null` so
/// every row carries the same keys.
pub fn document_to_json_coerced(doc: Document, fields: &[&str]) -> Value {
    let mut out = Map::with_capacity(doc.len() + fields.len());
    for (key, value) in doc {
        let rendered = if fields.contains(&key.as_str()) {
            coerce_numeric(Some(&value))
        } else {
            bson_to_json(value)
        };
        out.insert(key, rendered);
    }
    for field in fields {
        if !out.contains_key(*field) {
            out.insert((*field).to_owned(), Value::Null);
        }
    }
    Value::Object(out)
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Double(f) => number_to_json(f),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match Utc.timestamp_millis_opt(dt.timestamp_millis()).single() {
            Some(ts) => Value::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        other => other.into_relaxed_extjson(),
    }
}

/// `Number(value)` for a BSON value; `NaN` renders as `null`.
pub fn coerce_numeric(value: Option<&Bson>) -> Value {
    let number = match value {
        Some(Bson::Double(f)) => Some(*f),
        Some(Bson::Int32(i)) => Some(f64::from(*i)),
        Some(Bson::Int64(i)) => Some(*i as f64),
        Some(Bson::Decimal128(d)) => decimal_to_f64(d),
        Some(Bson::String(s)) => parse_numeric_str(s),
        Some(Bson::Boolean(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(Bson::Null) => Some(0.0),
        Some(Bson::DateTime(dt)) => Some(dt.timestamp_millis() as f64),
        _ => None,
    };
    number.map(number_to_json).unwrap_or(Value::Null)
}

/// Integral values within the JS safe range become JSON integers.
pub fn number_to_json(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Value::from(n as i64);
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

pub(crate) fn decimal_to_f64(value: &Decimal128) -> Option<f64> {
    match Bson::Decimal128(*value).into_relaxed_extjson() {
        Value::Object(map) => map
            .get("$numberDecimal")
            .and_then(Value::as_str)
            .and_then(parse_numeric_str),
        _ => None,
    }
}
