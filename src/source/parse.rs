//! Tolerant parsing of the node-query tool output.
//!
//! JSON is tried first. The tool interleaves diagnostic text ("Connected to
//! radio", progress lines, warnings) often enough that a plain
//! `serde_json::from_str` is not sufficient. Output with no JSON in it is
//! read as the box-drawn node table. `None` means "nothing usable in this
//! output": the caller skips the tick.

use super::table::parse_table;
use crate::models::node::NodeReport;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid JSON block regex"));

/// Parse the tool output into node reports.
///
/// Nodes without a usable id are dropped; an empty vector is a valid
/// answer (nothing in range).
pub fn parse_nodes(output: &str) -> Option<Vec<NodeReport>> {
    let Some(value) = extract_json(output) else {
        return parse_table(output);
    };

    let nodes = node_entries(&value)
        .into_iter()
        .filter_map(|(key, node)| node_from_value(key, node))
        .collect();

    Some(nodes)
}

fn extract_json(output: &str) -> Option<Value> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(v) = serde_json::from_str::<Value>(trimmed) {
        return Some(v);
    }

    // Noise around the payload: take the outermost {...} span.
    let block = JSON_BLOCK.find(trimmed)?;
    serde_json::from_str(block.as_str()).ok()
}

/// Flattens the supported top-level shapes into (map key, node) pairs.
fn node_entries(value: &Value) -> Vec<(Option<&str>, &Value)> {
    match value {
        Value::Object(map) if map.contains_key("nodes") => match &map["nodes"] {
            Value::Array(items) => items.iter().map(|n| (None, n)).collect(),
            Value::Object(by_id) => by_id.iter().map(|(k, n)| (Some(k.as_str()), n)).collect(),
            _ => Vec::new(),
        },
        Value::Array(items) => items.iter().map(|n| (None, n)).collect(),
        Value::Object(_) => vec![(None, value)],
        _ => Vec::new(),
    }
}

fn node_from_value(key: Option<&str>, value: &Value) -> Option<NodeReport> {
    let node = value.as_object()?;
    let user = node.get("user").and_then(Value::as_object);
    let position = node.get("position").and_then(Value::as_object);

    let node_id = id_field(node.get("node_id"))
        .or_else(|| user.and_then(|u| id_field(u.get("id"))))
        .or_else(|| id_field(node.get("id")))
        .or_else(|| key.map(str::to_string))
        .or_else(|| id_field(node.get("num")))?;

    Some(NodeReport {
        node_id,
        short_name: text_field(node, user, "short_name", "shortName"),
        long_name: text_field(node, user, "long_name", "longName"),
        hardware_model: text_field(node, user, "hardware_model", "hwModel"),
        rssi: node.get("rssi").and_then(as_i32),
        snr: node.get("snr").and_then(Value::as_f64),
        latitude: coordinate(node, position, "latitude", "latitudeI"),
        longitude: coordinate(node, position, "longitude", "longitudeI"),
        altitude: node
            .get("altitude")
            .or_else(|| position.and_then(|p| p.get("altitude")))
            .and_then(Value::as_f64),
        last_heard: node
            .get("last_heard")
            .or_else(|| node.get("lastHeard"))
            .and_then(Value::as_i64),
    })
}

fn id_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() && s != "unknown" => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Flat `snake_case` key first, then the nested meshtastic `user.camelCase` key.
fn text_field(
    node: &Map<String, Value>,
    user: Option<&Map<String, Value>>,
    flat: &str,
    nested: &str,
) -> String {
    node.get(flat)
        .or_else(|| user.and_then(|u| u.get(nested)))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("Unknown")
        .to_string()
}

/// Degrees from the flat key, the nested `position` key, or the integer
/// `latitudeI`/`longitudeI` form (1e-7 degrees).
fn coordinate(
    node: &Map<String, Value>,
    position: Option<&Map<String, Value>>,
    key: &str,
    int_key: &str,
) -> Option<f64> {
    node.get(key)
        .or_else(|| position.and_then(|p| p.get(key)))
        .and_then(Value::as_f64)
        .or_else(|| {
            position
                .and_then(|p| p.get(int_key))
                .and_then(Value::as_i64)
                .map(|i| i as f64 * 1e-7)
        })
}

fn as_i32(value: &Value) -> Option<i32> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.round() as i64))
        .and_then(|i| i32::try_from(i).ok())
}
