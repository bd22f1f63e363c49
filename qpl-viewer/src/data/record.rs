use serde_json::{Map, Value};
use tracing::warn;

/// One QPL entry. Keys keep the order they had in the source JSON.
pub type Record = Map<String, Value>;

/// Keep the JSON objects of an array response and drop anything else
pub fn records_from_values(values: Vec<Value>) -> Vec<Record> {
    let total = values.len();
    let records: Vec<Record> = values
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();

    if records.len() != total {
        warn!(
            target: "data",
            "Skipped {} non-object entries out of {}",
            total - records.len(),
            total
        );
    }
    records
}
