//! Ordering of BSON values, matching MongoDB's sort order closely enough for
//! the flat documents this service reads.
//!
//! Values of different types compare by type bracket (null < numbers <
//! strings < documents < arrays < binary < ObjectId < booleans < dates <
//! timestamps < regex). A missing field sorts as null. Within a bracket,
//! numbers compare numerically across Int32/Int64/Double/Decimal128, strings
//! compare by bytes, and documents/arrays are treated as equal.

use std::cmp::Ordering;

use mongodb::bson::Bson;

use crate::convert::decimal_to_f64;

fn bracket(value: Option<&Bson>) -> u8 {
    match value {
        Some(Bson::MinKey) => 0,
        None | Some(Bson::Null) | Some(Bson::Undefined) => 1,
        Some(Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_)) => 2,
        Some(Bson::String(_) | Bson::Symbol(_)) => 3,
        Some(Bson::Document(_)) => 4,
        Some(Bson::Array(_)) => 5,
        Some(Bson::Binary(_)) => 6,
        Some(Bson::ObjectId(_)) => 7,
        Some(Bson::Boolean(_)) => 8,
        Some(Bson::DateTime(_)) => 9,
        Some(Bson::Timestamp(_)) => 10,
        Some(Bson::RegularExpression(_)) => 11,
        Some(Bson::MaxKey) => 13,
        Some(_) => 12,
    }
}

fn as_f64(value: &Bson) -> f64 {
    match value {
        Bson::Int32(i) => f64::from(*i),
        Bson::Int64(i) => *i as f64,
        Bson::Double(f) => *f,
        Bson::Decimal128(d) => decimal_to_f64(d).unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn as_str(value: &Bson) -> &str {
    match value {
        Bson::String(s) | Bson::Symbol(s) => s,
        _ => "",
    }
}

/// Ascending comparison of two (possibly missing) field values.
pub fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let by_bracket = bracket(a).cmp(&bracket(b));
    if by_bracket != Ordering::Equal {
        return by_bracket;
    }

    match (a, b) {
        (Some(x), Some(y)) => match bracket(a) {
            2 => compare_numbers(as_f64(x), as_f64(y)),
            3 => as_str(x).as_bytes().cmp(as_str(y).as_bytes()),
            7 => match (x, y) {
                (Bson::ObjectId(l), Bson::ObjectId(r)) => l.bytes().cmp(&r.bytes()),
                _ => Ordering::Equal,
            },
            8 => match (x, y) {
                (Bson::Boolean(l), Bson::Boolean(r)) => l.cmp(r),
                _ => Ordering::Equal,
            },
            9 => match (x, y) {
                (Bson::DateTime(l), Bson::DateTime(r)) => {
                    l.timestamp_millis().cmp(&r.timestamp_millis())
                }
                _ => Ordering::Equal,
            },
            10 => match (x, y) {
                (Bson::Timestamp(l), Bson::Timestamp(r)) => {
                    (l.time, l.increment).cmp(&(r.time, r.increment))
                }
                _ => Ordering::Equal,
            },
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}

/// NaN sorts below every other number in MongoDB.
fn compare_numbers(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}
