use mongodb::bson::{Bson, Document};
use serde_json::Value;
use wellbeing_db::convert::{document_to_json, document_to_json_coerced};
use wellbeing_db::work_location::{LOCATION_FIELD, NUMERIC_FIELDS};

/// Keep the first row seen for each `workLocation` value (missing counts as
/// one value), then render it, coercing the numeric fields when asked.
pub fn shape_impacts(rows: Vec<Document>, coerce: bool) -> Vec<Value> {
    let mut seen: Vec<Option<Bson>> = Vec::with_capacity(rows.len());
    let mut out = Vec::with_capacity(rows.len());

    for row in rows {
        let key = match row.get(LOCATION_FIELD) {
            None | Some(Bson::Null) | Some(Bson::Undefined) => None,
            Some(value) => Some(value.clone()),
        };
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(render_impact(row, coerce));
    }

    out
}

pub fn render_impact(row: Document, coerce: bool) -> Value {
    if coerce {
        document_to_json_coerced(row, &NUMERIC_FIELDS)
    } else {
        document_to_json(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use serde_json::json;

    #[test]
    fn duplicates_keep_the_first_row() {
        let rows = vec![
            doc! { "workLocation": "Hybrid", "totalEmployees": 80 },
            doc! { "workLocation": "Remote", "totalEmployees": "120" },
            doc! { "workLocation": "Hybrid", "totalEmployees": 5 },
        ];

        let shaped = shape_impacts(rows, true);
        assert_eq!(shaped.len(), 2);
        assert_eq!(shaped[0]["totalEmployees"], json!(80));
        assert_eq!(shaped[1]["totalEmployees"], json!(120));
    }

    #[test]
    fn rows_without_location_collapse_to_one() {
        let rows = vec![
            doc! { "totalEmployees": 1 },
            doc! { "workLocation": null, "totalEmployees": 2 },
        ];
        assert_eq!(shape_impacts(rows, false).len(), 1);
    }

    #[test]
    fn coercion_can_be_switched_off() {
        let rows = vec![doc! { "workLocation": "Remote", "totalEmployees": "120" }];
        let shaped = shape_impacts(rows, false);
        assert_eq!(shaped[0], json!({"workLocation": "Remote", "totalEmployees": "120"}));
    }
}
