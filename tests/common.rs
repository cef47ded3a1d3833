#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rmeshlogger::errors::AppResult;
use rmeshlogger::models::contact::ContactRecord;
use rmeshlogger::models::node::NodeReport;
use rmeshlogger::models::session::{Session, SessionLog};
use rmeshlogger::source::NodeSource;
use std::collections::VecDeque;
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, with HOME/APPDATA pointed at an empty per-test directory so a
/// developer's real config never leaks into the tests.
pub fn rml(name: &str) -> Command {
    let home = temp_dir(&format!("{name}_home"));
    let mut cmd = cargo_bin_cmd!("rmeshlogger");
    cmd.env("HOME", &home).env("APPDATA", &home);
    cmd
}

/// Fresh, empty directory inside the system temp dir.
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rml_{name}"));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Temporary file path inside tempdir, removed if it already exists.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rml_{name}_out.{ext}"));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn node(id: &str, rssi: Option<i32>, snr: Option<f64>) -> NodeReport {
    NodeReport {
        node_id: id.to_string(),
        short_name: id.trim_start_matches('!').chars().take(4).collect(),
        long_name: format!("Node {id}"),
        hardware_model: "HELTEC_V3".to_string(),
        rssi,
        snr,
        ..Default::default()
    }
}

pub fn positioned(mut n: NodeReport, lat: f64, lon: f64, alt: Option<f64>) -> NodeReport {
    n.latitude = Some(lat);
    n.longitude = Some(lon);
    n.altitude = alt;
    n
}

pub fn contact(id: &str, ts: &str, rssi: Option<i32>, pos: Option<(f64, f64)>) -> ContactRecord {
    let mut report = node(id, rssi, Some(4.5));
    if let Some((lat, lon)) = pos {
        report = positioned(report, lat, lon, None);
    }
    ContactRecord::from_report(&report, ts.to_string(), true)
}

/// Two closed sessions: the first with one positioned and one unpositioned
/// contact, the second with three contacts of which two are positioned.
pub fn sample_log() -> SessionLog {
    SessionLog {
        sessions: vec![
            Session {
                start_time: "2025-06-01T10:00:00+02:00".into(),
                end_time: Some("2025-06-01T11:00:00+02:00".into()),
                active: false,
                contacts: vec![
                    contact("!a1b2c3d4", "2025-06-01T10:05:00+02:00", Some(-62), Some((45.07, 7.68))),
                    contact("!0000beef", "2025-06-01T10:06:00+02:00", None, None),
                ],
            },
            Session {
                start_time: "2025-06-02T09:00:00+02:00".into(),
                end_time: Some("2025-06-02T09:30:00+02:00".into()),
                active: false,
                contacts: vec![
                    contact("!a1b2c3d4", "2025-06-02T09:01:00+02:00", Some(-95), Some((45.08, 7.69))),
                    contact("!cafe0001", "2025-06-02T09:02:00+02:00", Some(-48), None),
                    contact("!a1b2c3d4", "2025-06-02T09:03:00+02:00", Some(-71), Some((45.09, 7.70))),
                ],
            },
        ],
    }
}

/// Write `log` as the JSON session log and return its path.
pub fn write_log(name: &str, log: &SessionLog) -> String {
    let path = temp_out(name, "json");
    fs::write(&path, serde_json::to_string_pretty(log).expect("serialize")).expect("write log");
    path
}

/// A `NodeSource` that replays a fixed script of poll results.
/// Once exhausted it keeps reporting "no nodes visible".
pub struct ScriptedSource {
    polls: VecDeque<Option<Vec<NodeReport>>>,
}

impl ScriptedSource {
    pub fn new(polls: Vec<Option<Vec<NodeReport>>>) -> Self {
        Self {
            polls: polls.into(),
        }
    }
}

impl NodeSource for ScriptedSource {
    fn poll(&mut self) -> AppResult<Option<Vec<NodeReport>>> {
        Ok(self.polls.pop_front().unwrap_or_else(|| Some(Vec::new())))
    }
}
