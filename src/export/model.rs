// src/export/model.rs

use crate::models::contact::ContactRecord;
use serde::Serialize;

/// Flat row for CSV export. Absent optional values serialize as empty fields.
#[derive(Serialize, Clone, Debug)]
pub struct ContactExport {
    pub timestamp: String,
    pub node_id: String,
    pub short_name: String,
    pub long_name: String,
    pub hardware_model: String,
    pub rssi: Option<i32>,
    pub snr: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub is_new_contact: bool,
    pub observer_latitude: Option<f64>,
    pub observer_longitude: Option<f64>,
    pub observer_altitude: Option<f64>,
}

impl From<&ContactRecord> for ContactExport {
    fn from(c: &ContactRecord) -> Self {
        Self {
            timestamp: c.timestamp.clone(),
            node_id: c.node_id.clone(),
            short_name: c.short_name.clone(),
            long_name: c.long_name.clone(),
            hardware_model: c.hardware_model.clone(),
            rssi: c.rssi,
            snr: c.snr,
            latitude: c.latitude,
            longitude: c.longitude,
            altitude: c.altitude,
            is_new_contact: c.is_new_contact,
            observer_latitude: c.observer_latitude,
            observer_longitude: c.observer_longitude,
            observer_altitude: c.observer_altitude,
        }
    }
}

/// Header per CSV
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "timestamp",
        "node_id",
        "short_name",
        "long_name",
        "hardware_model",
        "rssi",
        "snr",
        "latitude",
        "longitude",
        "altitude",
        "is_new_contact",
        "observer_latitude",
        "observer_longitude",
        "observer_altitude",
    ]
}
