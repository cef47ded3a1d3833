//! Timestamp helpers. Records carry RFC 3339 local-time strings.

use chrono::{DateTime, Local};

pub fn now_rfc3339() -> String {
    Local::now().to_rfc3339()
}

/// "HH:MM:SS" of an RFC 3339 timestamp; the raw string when it does not parse
/// (logs written by older tools use naive ISO timestamps).
pub fn short_time(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| ts.to_string())
}
