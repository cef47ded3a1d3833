//! Change detection between polls.

use crate::models::node::NodeReport;
use std::collections::HashMap;

/// Why a record is emitted for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    NewContact,
    Update,
}

impl ChangeKind {
    pub fn banner(&self) -> &'static str {
        match self {
            ChangeKind::NewContact => "*** NEW CONTACT ***",
            ChangeKind::Update => "*** UPDATE ***",
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, ChangeKind::NewContact)
    }
}

/// Fields of the last recorded report that decide whether a node changed.
#[derive(Debug, Clone, PartialEq)]
struct KnownNodeState {
    rssi: Option<i32>,
    snr: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    altitude: Option<f64>,
}

impl From<&NodeReport> for KnownNodeState {
    fn from(r: &NodeReport) -> Self {
        Self {
            rssi: r.rssi,
            snr: r.snr,
            latitude: r.latitude,
            longitude: r.longitude,
            altitude: r.altitude,
        }
    }
}

/// In-memory map node_id → last recorded state. Empty at every start, so
/// every node is a new contact the first time a run sees it.
#[derive(Debug, Default)]
pub struct NodeTracker {
    known: HashMap<String, KnownNodeState>,
}

impl NodeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `report` against the last recorded state and remember it when
    /// it warrants a record.
    ///
    /// Comparison is exact: any difference in RSSI, SNR or position
    /// (including a value appearing or disappearing) is an update.
    pub fn observe(&mut self, report: &NodeReport) -> Option<ChangeKind> {
        let state = KnownNodeState::from(report);

        match self.known.get(&report.node_id) {
            None => {
                self.known.insert(report.node_id.clone(), state);
                Some(ChangeKind::NewContact)
            }
            Some(prev) if *prev == state => None,
            Some(_) => {
                self.known.insert(report.node_id.clone(), state);
                Some(ChangeKind::Update)
            }
        }
    }

    /// Distinct nodes seen this run.
    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
