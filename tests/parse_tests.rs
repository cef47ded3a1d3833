use rmeshlogger::errors::AppError;
use rmeshlogger::source::parse::parse_nodes;
use rmeshlogger::source::{CommandSource, NodeSource};

const MESHTASTIC_MAP: &str = r#"{
  "nodes": {
    "!a1b2c3d4": {
      "num": 2712847316,
      "user": {"id": "!a1b2c3d4", "shortName": "TRN1", "longName": "Torino Roof", "hwModel": "RAK4631"},
      "position": {"latitude": 45.0703, "longitude": 7.6869, "altitude": 240},
      "snr": 6.25,
      "rssi": -71,
      "lastHeard": 1748770000
    },
    "!0000beef": {
      "num": 48879,
      "user": {"shortName": "BEEF", "longName": "Beef Node", "hwModel": "TBEAM"},
      "position": {"latitudeI": 450800000, "longitudeI": 76900000}
    }
  }
}"#;

#[test]
fn parses_nested_meshtastic_map() {
    let nodes = parse_nodes(MESHTASTIC_MAP).expect("valid output");

    assert_eq!(nodes.len(), 2);

    let beef = nodes.iter().find(|n| n.short_name == "BEEF").unwrap();
    assert_eq!(beef.node_id, "!0000beef");
    assert!(!beef.has_signal());
    assert!((beef.latitude.unwrap() - 45.08).abs() < 1e-9);
    assert!((beef.longitude.unwrap() - 7.69).abs() < 1e-9);

    let roof = nodes.iter().find(|n| n.short_name == "TRN1").unwrap();
    assert_eq!(roof.node_id, "!a1b2c3d4");
    assert_eq!(roof.long_name, "Torino Roof");
    assert_eq!(roof.hardware_model, "RAK4631");
    assert_eq!(roof.rssi, Some(-71));
    assert_eq!(roof.snr, Some(6.25));
    assert_eq!(roof.altitude, Some(240.0));
    assert_eq!(roof.last_heard, Some(1748770000));
}

#[test]
fn parses_flat_array() {
    let out = r#"[
        {"node_id": "!cafe0001", "short_name": "CAFE", "long_name": "Cafe", "hardware_model": "HELTEC_V3",
         "rssi": -48, "snr": 11.5, "latitude": null, "longitude": null, "altitude": null},
        {"num": 42, "rssi": -100}
    ]"#;

    let nodes = parse_nodes(out).expect("valid output");

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].node_id, "!cafe0001");
    assert_eq!(nodes[0].latitude, None);
    assert_eq!(nodes[1].node_id, "42");
    assert_eq!(nodes[1].short_name, "Unknown");
}

#[test]
fn extracts_json_from_noisy_output() {
    let out = format!("Connected to radio\nWarning: slow link\n{MESHTASTIC_MAP}\nDone.\n");

    let nodes = parse_nodes(&out).expect("JSON inside noise");

    assert_eq!(nodes.len(), 2);
}

#[test]
fn garbage_output_is_not_node_data() {
    assert!(parse_nodes("").is_none());
    assert!(parse_nodes("   \n").is_none());
    assert!(parse_nodes("Error: could not open serial port /dev/ttyUSB0").is_none());
    assert!(parse_nodes("Connected {truncated").is_none());
}

#[test]
fn nodes_without_id_are_dropped() {
    let nodes = parse_nodes(r#"{"nodes": [{"rssi": -60}, {"id": "!00000001", "rssi": -61}]}"#).unwrap();

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].node_id, "!00000001");
}

#[test]
fn empty_node_list_is_valid() {
    assert_eq!(parse_nodes(r#"{"nodes": []}"#), Some(Vec::new()));
}

const NODE_TABLE: &str = "\
Connected to radio
╒════╤═══════╤═══════════╤══════╤═══════════╤════════╤════════╤════════════╤═══════════╤════════════╤═════════╤═══════════════╤══════════════╤═════════╤══════╤═════════╤═════════════════════╤═════════╕
│  N │ User  │ ID        │ AKA  │ Hardware  │ Pubkey │ Role   │ Latitude   │ Longitude │ Altitude   │ Battery │ Channel util. │ Tx air util. │ SNR     │ Hops │ Channel │ LastHeard           │ Since   │
╞════╪═══════╪═══════════╪══════╪═══════════╪════════╪════════╪════════════╪═══════════╪════════════╪═════════╪═══════════════╪══════════════╪═════════╪══════╪═════════╪═════════════════════╪═════════╡
│  1 │ Me    │ !0000aaaa │ ME   │ TBEAM     │ N/A    │ CLIENT │ 45.0600°   │ 7.6700°   │ 230m       │ 100%    │ 1.20%         │ 0.40%        │ N/A     │ N/A  │ 0       │ N/A                 │ N/A     │
├────┼───────┼───────────┼──────┼───────────┼────────┼────────┼────────────┼───────────┼────────────┼─────────┼───────────────┼──────────────┼─────────┼──────┼─────────┼─────────────────────┼─────────┤
│  2 │ Alice │ !a1b2c3d4 │ ALC  │ HELTEC_V3 │ N/A    │ CLIENT │ 45.0703°   │ 7.6869°   │ 240m       │ 87%     │ 3.10%         │ 0.90%        │ 6.25 dB │ 1    │ 0       │ 2025-06-01 10:05:00 │ 42 secs │
├────┼───────┼───────────┼──────┼───────────┼────────┼────────┼────────────┼───────────┼────────────┼─────────┼───────────────┼──────────────┼─────────┼──────┼─────────┼─────────────────────┼─────────┤
│  3 │ Bob   │ !0000beef │ BOB  │ RAK4631   │ N/A    │ ROUTER │ N/A        │ N/A       │ N/A        │ N/A     │ N/A           │ N/A          │ -3.5 dB │ 2    │ 0       │ 2025-06-01 10:04:00 │ 2 min   │
╘════╧═══════╧═══════════╧══════╧═══════════╧════════╧════════╧════════════╧═══════════╧════════════╧═════════╧═══════════════╧══════════════╧═════════╧══════╧═════════╧═════════════════════╧═════════╛
";

#[test]
fn parses_the_node_table() {
    let nodes = parse_nodes(NODE_TABLE).expect("table output");

    assert_eq!(nodes.len(), 3);

    let alice = nodes.iter().find(|n| n.node_id == "!a1b2c3d4").unwrap();
    assert_eq!(alice.short_name, "ALC");
    assert_eq!(alice.long_name, "Alice");
    assert_eq!(alice.hardware_model, "HELTEC_V3");
    assert_eq!(alice.rssi, None);
    assert_eq!(alice.snr, Some(6.25));
    assert_eq!(alice.latitude, Some(45.0703));
    assert_eq!(alice.longitude, Some(7.6869));
    assert_eq!(alice.altitude, Some(240.0));
    assert!(alice.last_heard.is_some());
    assert!(alice.has_signal());

    let bob = nodes.iter().find(|n| n.node_id == "!0000beef").unwrap();
    assert_eq!(bob.snr, Some(-3.5));
    assert!(bob.position().is_none());
    assert_eq!(bob.altitude, None);

    let me = nodes.iter().find(|n| n.short_name == "ME").unwrap();
    assert!(!me.has_signal());
    assert_eq!(me.last_heard, None);
}

#[test]
fn table_without_header_uses_the_stock_columns() {
    let row = "│ 1 │ Alice │ !a1b2c3d4 │ ALC │ HELTEC_V3 │ N/A │ CLIENT │ 45.0703° │ 7.6869° │ 240m │ 87% │ 3.10% │ 0.90% │ 6.25 dB │ 1 │ 0 │ N/A │ N/A │";

    let nodes = parse_nodes(row).expect("table row");

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].node_id, "!a1b2c3d4");
    assert_eq!(nodes[0].snr, Some(6.25));
    assert_eq!(nodes[0].altitude, Some(240.0));
}

#[test]
fn table_with_only_a_header_is_an_empty_answer() {
    let header = "│ N │ User │ ID │ AKA │ Hardware │ Latitude │ Longitude │ SNR │";

    assert_eq!(parse_nodes(header), Some(Vec::new()));
}

#[test]
fn missing_command_is_fatal() {
    let mut source = CommandSource::new("rml-no-such-node-tool", &[], None);

    assert!(matches!(source.poll(), Err(AppError::CommandNotFound(_))));
}

#[cfg(unix)]
#[test]
fn command_output_is_parsed() {
    let script = r#"echo 'Connected to radio'; echo '{"nodes": [{"node_id": "!cafe0001", "rssi": -48}]}'"#;
    let mut source = CommandSource::new("sh", &["-c".to_string(), script.to_string()], None);

    let nodes = source.poll().unwrap().expect("nodes");

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].rssi, Some(-48));
}

#[cfg(unix)]
#[test]
fn failing_command_skips_the_tick() {
    let mut source = CommandSource::new("sh", &["-c".to_string(), "echo oops >&2; exit 3".to_string()], None);

    assert!(source.poll().unwrap().is_none());
}

#[cfg(unix)]
#[test]
fn port_is_appended_to_the_command() {
    // sh -c '<script>' argv0 --port /dev/ttyUSB0  → $2 is the port
    let args = vec![
        "-c".to_string(),
        r#"printf '{"nodes": [{"node_id": "%s", "rssi": -50}]}' "$2""#.to_string(),
        "sh".to_string(),
    ];
    let mut source = CommandSource::new("sh", &args, Some("/dev/ttyUSB0".into()));

    assert_eq!(source.describe(), format!("sh {} --port /dev/ttyUSB0", args.join(" ")));
    let nodes = source.poll().unwrap().expect("nodes");
    assert_eq!(nodes[0].node_id, "/dev/ttyUSB0");
}
