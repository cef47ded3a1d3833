mod common;

use common::{contact, node, positioned, sample_log};
use rmeshlogger::core::analyze::SessionSelection;
use rmeshlogger::core::stats::{LogSummary, node_stats};
use rmeshlogger::core::tracker::{ChangeKind, NodeTracker};
use rmeshlogger::errors::AppError;
use rmeshlogger::export::build_kml;
use rmeshlogger::models::contact::ContactRecord;
use rmeshlogger::models::node::Position;
use rmeshlogger::models::session::SessionLog;
use rmeshlogger::models::signal::SignalQuality;
use rmeshlogger::store::text_log::format_block;

#[test]
fn rssi_bands() {
    assert_eq!(SignalQuality::from_rssi(-42), SignalQuality::Excellent);
    assert_eq!(SignalQuality::from_rssi(-50), SignalQuality::Good);
    assert_eq!(SignalQuality::from_rssi(-70), SignalQuality::Good);
    assert_eq!(SignalQuality::from_rssi(-71), SignalQuality::Fair);
    assert_eq!(SignalQuality::from_rssi(-85), SignalQuality::Fair);
    assert_eq!(SignalQuality::from_rssi(-100), SignalQuality::Poor);
    assert_eq!(SignalQuality::from_rssi(-101), SignalQuality::VeryPoor);
}

#[test]
fn snr_bands() {
    assert_eq!(SignalQuality::from_snr(12.0), SignalQuality::Excellent);
    assert_eq!(SignalQuality::from_snr(10.0), SignalQuality::Good);
    assert_eq!(SignalQuality::from_snr(5.0), SignalQuality::Good);
    assert_eq!(SignalQuality::from_snr(0.0), SignalQuality::Fair);
    assert_eq!(SignalQuality::from_snr(-0.25), SignalQuality::Poor);
}

#[test]
fn tracker_treats_appearing_or_vanishing_values_as_changes() {
    let mut tracker = NodeTracker::new();
    let with_rssi = node("!aaaa0001", Some(-60), None);
    let without_rssi = node("!aaaa0001", None, None);

    assert_eq!(tracker.observe(&with_rssi), Some(ChangeKind::NewContact));
    assert_eq!(tracker.observe(&without_rssi), Some(ChangeKind::Update));
    assert_eq!(tracker.observe(&without_rssi), None);
    assert_eq!(tracker.observe(&with_rssi), Some(ChangeKind::Update));
    assert_eq!(tracker.len(), 1);
}

#[test]
fn tracker_ignores_name_changes() {
    let mut tracker = NodeTracker::new();
    let a = node("!aaaa0001", Some(-60), None);
    let mut renamed = a.clone();
    renamed.long_name = "Renamed".into();

    tracker.observe(&a);

    assert_eq!(tracker.observe(&renamed), None);
}

#[test]
fn only_the_active_session_receives_contacts() {
    let mut log = SessionLog::default();
    let c = contact("!aaaa0001", "2025-06-01T10:00:00+02:00", Some(-60), None);

    assert!(matches!(log.record(c.clone()), Err(AppError::Other(_))));

    assert!(!log.begin_session("2025-06-01T09:59:00+02:00".into()));
    log.record(c.clone()).unwrap();
    log.close_active("2025-06-01T11:00:00+02:00".into());

    assert!(log.record(c).is_err());
    assert_eq!(log.total_contacts(), 1);
    assert_eq!(log.sessions[0].end_time.as_deref(), Some("2025-06-01T11:00:00+02:00"));
}

#[test]
fn stale_session_without_contacts_ends_at_its_start() {
    let mut log = SessionLog::default();
    log.begin_session("2025-06-01T09:00:00+02:00".into());

    assert!(log.begin_session("2025-06-02T09:00:00+02:00".into()));
    assert_eq!(log.sessions[0].end_time.as_deref(), Some("2025-06-01T09:00:00+02:00"));
    assert!(log.sessions[1].active);
}

#[test]
fn selection_resolution() {
    let log = sample_log();

    let last = SessionSelection::from_flags(None, false).resolve(&log).unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].0, 1);

    let all = SessionSelection::from_flags(None, true).resolve(&log).unwrap();
    assert_eq!(all.len(), 2);

    let missing = SessionSelection::from_flags(Some(7), false).resolve(&log);
    assert!(matches!(
        missing,
        Err(AppError::SessionNotFound { index: 7, total: 2 })
    ));

    let empty = SessionLog::default();
    assert!(matches!(
        SessionSelection::Last.resolve(&empty),
        Err(AppError::NoSessions(_))
    ));
}

#[test]
fn summary_tracks_best_and_worst_signal_per_node() {
    let summary = LogSummary::from_log(&sample_log());

    assert_eq!(summary.sessions, 2);
    assert_eq!(summary.total_contacts, 5);
    assert_eq!(summary.unique_nodes(), 3);

    let roof = summary.nodes.iter().find(|n| n.node_id == "!a1b2c3d4").unwrap();
    assert_eq!(roof.contacts, 3);
    assert_eq!(roof.best_rssi(), Some(-62));
    assert_eq!(roof.worst_rssi(), Some(-95));
    assert_eq!(roof.positions, 3);
    assert_eq!(roof.last_position, Some((45.09, 7.70, None)));

    let beef = summary.nodes.iter().find(|n| n.node_id == "!0000beef").unwrap();
    assert_eq!(beef.best_rssi(), None);
    assert_eq!(beef.avg_snr(), Some(4.5));
}

#[test]
fn node_stats_keep_first_seen_order() {
    let log = sample_log();

    let ids: Vec<String> = node_stats(&log.sessions[1].contacts)
        .into_iter()
        .map(|n| n.node_id)
        .collect();

    assert_eq!(ids, vec!["!a1b2c3d4", "!cafe0001"]);
}

#[test]
fn kml_escapes_text_and_skips_unpositioned_contacts() {
    let mut report = positioned(node("!aaaa0001", Some(-60), Some(5.5)), 45.0, 7.0, Some(12.5));
    report.short_name = "R&D <1>".into();
    let positioned_contact = ContactRecord::from_report(&report, "2025-06-01T10:00:00+02:00".into(), true);
    let unpositioned = contact("!aaaa0002", "2025-06-01T10:01:00+02:00", Some(-70), None);

    let (kml, placemarks) = build_kml([&positioned_contact, &unpositioned]);

    assert_eq!(placemarks, 1);
    assert!(kml.contains("<name>R&amp;D &lt;1&gt; (!aaaa0001)</name>"));
    assert!(kml.contains("<coordinates>7,45,12.5</coordinates>"));
    assert!(!kml.contains("!aaaa0002"));
}

#[test]
fn update_block_format() {
    let mut c = contact("!aaaa0001", "2025-06-01T10:00:00+02:00", None, None);
    c.snr = None;

    let block = format_block(ChangeKind::Update, &c);

    assert!(block.starts_with("*** UPDATE ***\nTimestamp: 2025-06-01T10:00:00+02:00\n"));
    assert!(block.contains("Signal: RSSI=N/A dBm, SNR=N/A dB\n"));
    assert!(block.contains("Position: Not available\n"));
    assert!(block.contains(&"-".repeat(40)));
}

#[test]
fn node_position_needs_both_coordinates() {
    let mut n = node("!aaaa0001", Some(-60), None);
    n.latitude = Some(45.0);
    assert!(n.position().is_none());

    let n = positioned(n, 45.0, 7.0, None);
    assert_eq!(
        n.position(),
        Some(Position {
            latitude: 45.0,
            longitude: 7.0,
            altitude: None
        })
    );
}

#[test]
fn local_node_matches_id_or_short_name() {
    let n = node("!a1b2c3d4", None, None);

    assert!(n.is_local("!a1b2c3d4"));
    assert!(n.is_local("A1B2C3D4"));
    assert!(n.is_local(&n.short_name.to_uppercase()));
    assert!(!n.is_local("!a1b2c3d5"));
    assert!(!n.is_local("  "));
}

#[test]
fn tracker_starts_empty() {
    let mut tracker = NodeTracker::new();
    assert!(tracker.is_empty());

    tracker.observe(&node("!aaaa0001", Some(-60), None));
    assert!(!tracker.is_empty());
}

#[test]
fn observer_line_only_when_recorded() {
    let plain = contact("!aaaa0001", "2025-06-01T10:00:00+02:00", Some(-60), None);
    assert!(!format_block(ChangeKind::NewContact, &plain).contains("Observer:"));

    let observed = plain.observed_from(Some(Position {
        latitude: 45.06,
        longitude: 7.67,
        altitude: None,
    }));
    let block = format_block(ChangeKind::NewContact, &observed);
    assert!(block.contains("Observer: 45.060000, 7.670000\n"));
}
