use super::node::{NodeReport, Position};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single recorded sighting (new contact or update) of one node.
/// Immutable once appended to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub timestamp: String, // RFC 3339, local time
    #[serde(default)]
    pub is_new_contact: bool,
    #[serde(deserialize_with = "node_id_from_any")]
    pub node_id: String,
    #[serde(default = "unknown")]
    pub short_name: String,
    #[serde(default = "unknown")]
    pub long_name: String,
    #[serde(alias = "hw_model", default = "unknown")]
    pub hardware_model: String,
    pub rssi: Option<i32>,
    pub snr: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_heard: Option<i64>,
    /// Where the logging radio was when this contact was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observer_latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observer_longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observer_altitude: Option<f64>,
}

fn unknown() -> String {
    "Unknown".to_string()
}

/// Older logs stored the numeric node number instead of the `!xxxxxxxx` id.
fn node_id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "invalid node_id: {other}"
        ))),
    }
}

impl ContactRecord {
    pub fn from_report(report: &NodeReport, timestamp: String, is_new_contact: bool) -> Self {
        Self {
            timestamp,
            is_new_contact,
            node_id: report.node_id.clone(),
            short_name: report.short_name.clone(),
            long_name: report.long_name.clone(),
            hardware_model: report.hardware_model.clone(),
            rssi: report.rssi,
            snr: report.snr,
            latitude: report.latitude,
            longitude: report.longitude,
            altitude: report.altitude,
            last_heard: report.last_heard,
            observer_latitude: None,
            observer_longitude: None,
            observer_altitude: None,
        }
    }

    /// Stamp the observer's own fix on the record.
    pub fn observed_from(mut self, observer: Option<Position>) -> Self {
        if let Some(fix) = observer {
            self.observer_latitude = Some(fix.latitude);
            self.observer_longitude = Some(fix.longitude);
            self.observer_altitude = fix.altitude;
        }
        self
    }

    /// Both latitude and longitude are present.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} ({})", self.short_name, self.long_name)
    }

    /// "lat, lon[, Alt: Xm]" or "Not available".
    pub fn position_label(&self) -> String {
        match self.position() {
            Some((lat, lon)) => match self.altitude {
                Some(alt) => format!("{lat:.6}, {lon:.6}, Alt: {alt}m"),
                None => format!("{lat:.6}, {lon:.6}"),
            },
            None => "Not available".to_string(),
        }
    }

    /// Observer fix as "lat, lon[, Alt: Xm]", if one was recorded.
    pub fn observer_label(&self) -> Option<String> {
        let (lat, lon) = (self.observer_latitude?, self.observer_longitude?);
        Some(match self.observer_altitude {
            Some(alt) => format!("{lat:.6}, {lon:.6}, Alt: {alt}m"),
            None => format!("{lat:.6}, {lon:.6}"),
        })
    }
}
