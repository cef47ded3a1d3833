//! The box-drawn node table `meshtastic --nodes` prints by default.
//!
//! ```text
//! │  N │ User  │ ID        │ AKA │ Hardware  │ … │ Latitude │ Longitude │ Altitude │ … │ SNR     │ … │ LastHeard           │ Since   │
//! │  1 │ Alice │ !a1b2c3d4 │ ALC │ HELTEC_V3 │ … │ 45.0703° │ 7.6869°   │ 240m     │ … │ 6.25 dB │ … │ 2025-06-01 10:05:00 │ 42 secs │
//! ```
//!
//! Columns are located through the header row; without one the stock
//! column order is assumed. `N/A` and empty cells are absent values.

use crate::models::node::NodeReport;
use chrono::{Local, NaiveDateTime, TimeZone};

const BAR: char = '│';
const NOT_AVAILABLE: &str = "N/A";
const LAST_HEARD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unit suffixes stripped from numeric cells, longest first.
const UNITS: [&str; 5] = ["dBm", "dB", "°", "m", "%"];

/// Column positions of the fields the logger keeps.
#[derive(Debug, Clone, Copy)]
struct Columns {
    user: Option<usize>,
    id: Option<usize>,
    aka: Option<usize>,
    hardware: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    altitude: Option<usize>,
    rssi: Option<usize>,
    snr: Option<usize>,
    last_heard: Option<usize>,
}

impl Default for Columns {
    /// Stock `meshtastic --nodes` layout.
    fn default() -> Self {
        Self {
            user: Some(1),
            id: Some(2),
            aka: Some(3),
            hardware: Some(4),
            latitude: Some(7),
            longitude: Some(8),
            altitude: Some(9),
            rssi: None,
            snr: Some(13),
            last_heard: Some(16),
        }
    }
}

impl Columns {
    fn from_header(header: &[&str]) -> Self {
        let find = |names: &[&str]| {
            header.iter().position(|h| {
                let h = h.to_ascii_lowercase();
                names.iter().any(|n| h == *n)
            })
        };

        Self {
            user: find(&["user"]),
            id: find(&["id"]),
            aka: find(&["aka"]),
            hardware: find(&["hardware"]),
            latitude: find(&["latitude"]),
            longitude: find(&["longitude"]),
            altitude: find(&["altitude"]),
            rssi: find(&["rssi"]),
            snr: find(&["snr"]),
            last_heard: find(&["lastheard", "last heard"]),
        }
    }

    fn node(&self, row: &[&str]) -> Option<NodeReport> {
        let node_id = cell(row, self.id)?.to_string();

        Some(NodeReport {
            node_id,
            short_name: text(row, self.aka),
            long_name: text(row, self.user),
            hardware_model: text(row, self.hardware),
            rssi: cell(row, self.rssi)
                .and_then(number)
                .map(|r| r.round() as i32),
            snr: cell(row, self.snr).and_then(number),
            latitude: cell(row, self.latitude).and_then(number),
            longitude: cell(row, self.longitude).and_then(number),
            altitude: cell(row, self.altitude).and_then(number),
            last_heard: cell(row, self.last_heard).and_then(epoch_seconds),
        })
    }
}

/// Parse the node table. `None` when the output holds no table at all; a
/// table with only its header is a valid empty answer.
pub fn parse_table(output: &str) -> Option<Vec<NodeReport>> {
    let rows: Vec<Vec<&str>> = output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(BAR))
        .map(cells)
        .collect();

    if rows.is_empty() {
        return None;
    }

    let columns = rows
        .iter()
        .find(|row| !is_data_row(row))
        .map(|header| Columns::from_header(header))
        .unwrap_or_default();

    let nodes = rows
        .iter()
        .filter(|row| is_data_row(row))
        .filter_map(|row| columns.node(row))
        .collect();

    Some(nodes)
}

fn cells(line: &str) -> Vec<&str> {
    line.trim_matches(BAR).split(BAR).map(str::trim).collect()
}

/// Data rows start with the row number.
fn is_data_row(row: &[&str]) -> bool {
    row.first()
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

fn cell<'a>(row: &[&'a str], index: Option<usize>) -> Option<&'a str> {
    row.get(index?)
        .copied()
        .filter(|v| !v.is_empty() && *v != NOT_AVAILABLE)
}

fn text(row: &[&str], index: Option<usize>) -> String {
    cell(row, index).unwrap_or("Unknown").to_string()
}

/// "6.25 dB", "45.0703°", "240m" → number.
fn number(raw: &str) -> Option<f64> {
    let mut value = raw.trim();
    for unit in UNITS {
        if let Some(stripped) = value.strip_suffix(unit) {
            value = stripped.trim_end();
        }
    }
    value.parse().ok()
}

/// The table prints local wall-clock time.
fn epoch_seconds(raw: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(raw, LAST_HEARD_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp())
}
