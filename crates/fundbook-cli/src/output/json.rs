//! JSON output formatting.
//!
//! Amounts are emitted as strings so their decimal representation survives
//! consumers that parse numbers as floats.

use serde_json::{json, Map, Value};

use fundbook_core::store::{Entry, EntryKind, HistoryEntry, Totals, DATE_FORMAT, TIMESTAMP_FORMAT};

/// Convert one entry to JSON, keyed by the kind's primary column.
pub fn entry_json(kind: EntryKind, entry: &Entry) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), json!(entry.id));
    map.insert(
        kind.primary_column().to_lowercase(),
        json!(entry.label),
    );
    map.insert("amount".to_string(), json!(entry.amount.to_string()));
    map.insert(
        "date".to_string(),
        json!(entry.date.format(DATE_FORMAT).to_string()),
    );
    Value::Object(map)
}

pub fn entries_json(kind: EntryKind, entries: &[Entry]) -> Vec<Value> {
    entries.iter().map(|entry| entry_json(kind, entry)).collect()
}

pub fn history_json(kind: EntryKind, rows: &[HistoryEntry]) -> Vec<Value> {
    rows.iter()
        .map(|row| {
            let mut map = Map::new();
            map.insert("action".to_string(), json!(row.action.as_str()));
            map.insert(
                "timestamp".to_string(),
                json!(row.timestamp.format(TIMESTAMP_FORMAT).to_string()),
            );
            map.insert("username".to_string(), json!(row.username));
            if let Value::Object(snapshot) = entry_json(kind, &row.snapshot) {
                map.extend(snapshot);
            }
            Value::Object(map)
        })
        .collect()
}

pub fn totals_json(totals: &Totals) -> Value {
    json!({
        "collected": totals.collected.to_string(),
        "spent": totals.spent.to_string(),
        "balance": totals.balance.to_string(),
    })
}
