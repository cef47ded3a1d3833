/// One node as reported by the node-query tool during a single poll.
///
/// Only the fields the logger cares about are kept; everything else the
/// tool prints is discarded by the parser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeReport {
    pub node_id: String,
    pub short_name: String,
    pub long_name: String,
    pub hardware_model: String,
    pub rssi: Option<i32>,
    pub snr: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub last_heard: Option<i64>, // epoch seconds, as printed by the radio
}

impl NodeReport {
    /// A node with neither RSSI nor SNR was not actually heard over the air
    /// (typically the local radio itself).
    pub fn has_signal(&self) -> bool {
        self.rssi.is_some() || self.snr.is_some()
    }

    /// The reported fix, when both latitude and longitude are present.
    pub fn position(&self) -> Option<Position> {
        Some(Position {
            latitude: self.latitude?,
            longitude: self.longitude?,
            altitude: self.altitude,
        })
    }

    /// Matches `--my-node`: the node id (with or without the leading `!`)
    /// or the short name, ignoring case.
    pub fn is_local(&self, my_node: &str) -> bool {
        let wanted = my_node.trim().trim_start_matches('!');
        !wanted.is_empty()
            && (self.node_id.trim_start_matches('!').eq_ignore_ascii_case(wanted)
                || self.short_name.eq_ignore_ascii_case(wanted))
    }
}

/// A geographic fix in decimal degrees; altitude in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
}
