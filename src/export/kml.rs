// src/export/kml.rs

use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::models::contact::ContactRecord;
use crate::ui::messages::{info, warning};
use std::fs;
use std::path::Path;

const KML_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document>
    <name>Meshtastic Contacts</name>
    <description>Logged Meshtastic node contacts</description>
    <Style id="nodeStyle">
        <IconStyle>
            <Icon>
                <href>http://maps.google.com/mapfiles/kml/pushpin/red-pushpin.png</href>
            </Icon>
        </IconStyle>
    </Style>
"#;

const KML_TAIL: &str = "</Document>\n</kml>\n";

/// Build the KML document: one placemark per contact with both latitude and
/// longitude. Returns the document and the number of placemarks.
pub fn build_kml<'a>(contacts: impl IntoIterator<Item = &'a ContactRecord>) -> (String, usize) {
    let mut out = String::from(KML_HEAD);
    let mut placemarks = 0;

    for c in contacts {
        let Some((lat, lon)) = c.position() else {
            continue;
        };

        placemarks += 1;
        out.push_str(&format!(
            r#"    <Placemark>
        <name>{name} ({id})</name>
        <description>
            Node ID: {id}
            Long Name: {long_name}
            Time: {ts}
            RSSI: {rssi} dBm
            SNR: {snr} dB
        </description>
        <TimeStamp><when>{ts}</when></TimeStamp>
        <styleUrl>#nodeStyle</styleUrl>
        <Point>
            <coordinates>{lon},{lat},{alt}</coordinates>
        </Point>
    </Placemark>
"#,
            name = escape_xml(&c.short_name),
            id = escape_xml(&c.node_id),
            long_name = escape_xml(&c.long_name),
            ts = escape_xml(&c.timestamp),
            rssi = c.rssi.map(|r| r.to_string()).unwrap_or_else(|| "N/A".into()),
            snr = c.snr.map(|s| s.to_string()).unwrap_or_else(|| "N/A".into()),
            alt = c.altitude.unwrap_or(0.0),
        ));
    }

    out.push_str(KML_TAIL);
    (out, placemarks)
}

pub(crate) fn export_kml(contacts: &[&ContactRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to KML: {}", path.display()));

    let (kml, placemarks) = build_kml(contacts.iter().copied());
    fs::write(path, kml)?;

    notify_export_success("KML", path);
    if placemarks == 0 {
        warning("No contact in the selection has a position: the KML holds no placemarks.");
    } else {
        info(format!("Contains {placemarks} placemark(s) with position data"));
    }
    Ok(())
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
