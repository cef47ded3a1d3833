//! Aggregations over recorded contacts, shared by the session and summary views.

use crate::models::contact::ContactRecord;
use crate::models::session::SessionLog;
use std::collections::HashMap;

/// Everything recorded for one node across a set of contacts.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStats {
    pub node_id: String,
    pub short_name: String,
    pub long_name: String,
    pub hardware_model: String,
    pub first_seen: String,
    pub last_seen: String,
    pub contacts: usize,
    pub rssi: Vec<i32>,
    pub snr: Vec<f64>,
    pub positions: usize,
    pub last_position: Option<(f64, f64, Option<f64>)>,
}

impl NodeStats {
    fn new(first: &ContactRecord) -> Self {
        Self {
            node_id: first.node_id.clone(),
            short_name: first.short_name.clone(),
            long_name: first.long_name.clone(),
            hardware_model: first.hardware_model.clone(),
            first_seen: first.timestamp.clone(),
            last_seen: first.timestamp.clone(),
            contacts: 0,
            rssi: Vec::new(),
            snr: Vec::new(),
            positions: 0,
            last_position: None,
        }
    }

    fn add(&mut self, c: &ContactRecord) {
        self.contacts += 1;
        self.last_seen = c.timestamp.clone();

        if let Some(r) = c.rssi {
            self.rssi.push(r);
        }
        if let Some(s) = c.snr {
            self.snr.push(s);
        }
        if let Some((lat, lon)) = c.position() {
            self.positions += 1;
            self.last_position = Some((lat, lon, c.altitude));
        }
    }

    /// Strongest RSSI (closest to zero).
    pub fn best_rssi(&self) -> Option<i32> {
        self.rssi.iter().copied().max()
    }

    pub fn worst_rssi(&self) -> Option<i32> {
        self.rssi.iter().copied().min()
    }

    pub fn avg_rssi(&self) -> Option<f64> {
        mean(self.rssi.iter().map(|&r| f64::from(r)))
    }

    pub fn best_snr(&self) -> Option<f64> {
        self.snr.iter().copied().reduce(f64::max)
    }

    pub fn worst_snr(&self) -> Option<f64> {
        self.snr.iter().copied().reduce(f64::min)
    }

    pub fn avg_snr(&self) -> Option<f64> {
        mean(self.snr.iter().copied())
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Per-node stats in first-seen order.
pub fn node_stats<'a>(contacts: impl IntoIterator<Item = &'a ContactRecord>) -> Vec<NodeStats> {
    let mut order: HashMap<String, usize> = HashMap::new();
    let mut nodes: Vec<NodeStats> = Vec::new();

    for c in contacts {
        let idx = *order.entry(c.node_id.clone()).or_insert_with(|| {
            nodes.push(NodeStats::new(c));
            nodes.len() - 1
        });
        nodes[idx].add(c);
    }

    nodes
}

/// Totals across the whole log.
#[derive(Debug, Clone)]
pub struct LogSummary {
    pub sessions: usize,
    pub total_contacts: usize,
    pub nodes: Vec<NodeStats>,
}

impl LogSummary {
    pub fn from_log(log: &SessionLog) -> Self {
        Self {
            sessions: log.sessions.len(),
            total_contacts: log.total_contacts(),
            nodes: node_stats(log.sessions.iter().flat_map(|s| s.contacts.iter())),
        }
    }

    pub fn unique_nodes(&self) -> usize {
        self.nodes.len()
    }
}
