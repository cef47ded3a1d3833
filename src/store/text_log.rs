//! Human-readable, append-only contact log.

use crate::core::tracker::ChangeKind;
use crate::errors::AppResult;
use crate::models::contact::ContactRecord;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

const RULE_WIDTH: usize = 50;
const BLOCK_RULE_WIDTH: usize = 40;

pub struct TextLog {
    file: File,
}

impl TextLog {
    /// Open (or create, with a banner) the text log in append mode.
    pub fn open(path: impl Into<PathBuf>, started: &str) -> AppResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let is_new = !path.exists();
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        if is_new {
            write!(
                file,
                "=== Meshtastic Contact Logger ===\nStarted: {started}\n{}\n\n",
                "=".repeat(RULE_WIDTH)
            )?;
        }

        Ok(Self { file })
    }

    pub fn session_started(&mut self, timestamp: &str) -> AppResult<()> {
        writeln!(self.file, ">>> Session started: {timestamp}\n")?;
        self.file.flush()?;
        Ok(())
    }

    pub fn session_ended(&mut self, timestamp: &str, unique_nodes: usize) -> AppResult<()> {
        writeln!(
            self.file,
            "<<< Session ended: {timestamp} ({unique_nodes} unique node(s))\n"
        )?;
        self.file.flush()?;
        Ok(())
    }

    /// Append one record block.
    pub fn append(&mut self, kind: ChangeKind, record: &ContactRecord) -> AppResult<()> {
        self.file.write_all(format_block(kind, record).as_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}

/// The fixed `*** NEW CONTACT ***` / `*** UPDATE ***` block.
pub fn format_block(kind: ChangeKind, record: &ContactRecord) -> String {
    let rssi = record
        .rssi
        .map(|r| r.to_string())
        .unwrap_or_else(|| "N/A".into());
    let snr = record
        .snr
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".into());

    let observer = record
        .observer_label()
        .map(|label| format!("Observer: {label}\n"))
        .unwrap_or_default();

    format!(
        "{}\nTimestamp: {}\nNode ID: {}\nName: {}\nHardware: {}\nSignal: RSSI={} dBm, SNR={} dB\nPosition: {}\n{}{}\n\n",
        kind.banner(),
        record.timestamp,
        record.node_id,
        record.display_name(),
        record.hardware_model,
        rssi,
        snr,
        record.position_label(),
        observer,
        "-".repeat(BLOCK_RULE_WIDTH),
    )
}
