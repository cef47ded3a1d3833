use crate::core::stats::{LogSummary, NodeStats, node_stats};
use crate::errors::{AppError, AppResult};
use crate::models::session::{Session, SessionLog};
use crate::models::signal::{describe_rssi, describe_snr};
use crate::ui::messages::header;
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW};
use crate::utils::table::{Column, Table};
use crate::utils::time::short_time;

/// Which sessions a view or export works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSelection {
    /// The most recent session, active or closed.
    Last,
    /// Zero-based index into the stored sequence.
    Index(usize),
    All,
}

impl SessionSelection {
    /// `--session` wins over `--all`.
    pub fn from_flags(index: Option<usize>, all: bool) -> Self {
        match (index, all) {
            (Some(i), _) => Self::Index(i),
            (None, true) => Self::All,
            (None, false) => Self::Last,
        }
    }

    /// Resolve against the log. Fails with `SessionNotFound` for an index
    /// out of range, and `NoSessions` for an empty log.
    pub fn resolve<'a>(&self, log: &'a SessionLog) -> AppResult<Vec<(usize, &'a Session)>> {
        match self {
            SessionSelection::Index(i) => Ok(vec![(*i, log.session(*i)?)]),
            SessionSelection::Last => {
                let i = log
                    .last_index()
                    .ok_or_else(|| AppError::NoSessions("session log".into()))?;
                Ok(vec![(i, log.session(i)?)])
            }
            SessionSelection::All => {
                if log.is_empty() {
                    return Err(AppError::NoSessions("session log".into()));
                }
                Ok(log.sessions.iter().enumerate().collect())
            }
        }
    }
}

pub struct AnalyzeLogic;

impl AnalyzeLogic {
    /// Last-session / specific-session view.
    pub fn print_session(index: usize, session: &Session) {
        header(format!("SESSION #{index}"));

        println!("Session Start : {}", session.start_time);
        println!(
            "Session End   : {}",
            session.end_time.as_deref().unwrap_or("Ongoing")
        );
        let status_colour = if session.active { YELLOW } else { GREEN };
        println!("Status        : {status_colour}{}{RESET}", session.status_label());
        println!("Total Contacts: {}", session.contacts.len());
        println!("Unique Nodes  : {}", session.unique_nodes());

        if session.contacts.is_empty() {
            println!("\n{GREY}No contacts in this session{RESET}");
            return;
        }

        println!("\n--- CONTACTS ---\n");
        for c in &session.contacts {
            let kind = if c.is_new_contact { "NEW   " } else { "UPDATE" };
            println!(
                "[{}] {kind} {} <{}> RSSI: {} | SNR: {}",
                short_time(&c.timestamp),
                c.display_name(),
                c.node_id,
                describe_rssi(c.rssi),
                describe_snr(c.snr),
            );
        }

        println!("\n--- NODE DETAILS ---");
        for node in node_stats(&session.contacts) {
            print_node(&node);
        }
        println!();
    }

    /// Summary view across every stored session.
    pub fn print_summary(log: &SessionLog) {
        let summary = LogSummary::from_log(log);

        header("OVERALL SUMMARY");

        println!("Total Sessions       : {}", summary.sessions);
        println!("Total Contact Records: {}", summary.total_contacts);
        println!("Unique Nodes Seen    : {}", summary.unique_nodes());

        println!("\nSessions:");
        for (i, s) in log.sessions.iter().enumerate() {
            println!(
                "  #{i}: {} - {} ({} contacts)",
                s.start_time,
                s.status_label(),
                s.contacts.len()
            );
        }

        if summary.nodes.is_empty() {
            return;
        }

        println!("\nSignal per node:\n");
        let mut table = Table::new(vec![
            Column::new("Node ID", 12),
            Column::new("Name", 20),
            Column::new("Seen", 5),
            Column::new("Best RSSI", 10),
            Column::new("Worst RSSI", 10),
            Column::new("Best SNR", 9),
            Column::new("Worst SNR", 9),
        ]);

        for n in &summary.nodes {
            table.add_row(vec![
                n.node_id.clone(),
                n.short_name.clone(),
                n.contacts.to_string(),
                opt(n.best_rssi()),
                opt(n.worst_rssi()),
                opt(n.best_snr()),
                opt(n.worst_snr()),
            ]);
        }

        print!("{}", table.render());
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "-".into())
}

fn print_node(n: &NodeStats) {
    println!("\n📡 Node ID: {}", n.node_id);
    println!("   Name: {} ({})", n.short_name, n.long_name);
    println!("   Hardware: {}", n.hardware_model);
    println!("   First Seen: {}", n.first_seen);
    println!("   Last Seen: {}", n.last_seen);

    if let (Some(avg), Some(best), Some(worst)) = (n.avg_rssi(), n.best_rssi(), n.worst_rssi()) {
        println!("   RSSI: Avg={avg:.1} dBm, Best={best} dBm, Worst={worst} dBm");
    }

    if let (Some(avg), Some(best), Some(worst)) = (n.avg_snr(), n.best_snr(), n.worst_snr()) {
        println!("   SNR: Avg={avg:.1} dB, Best={best} dB, Worst={worst} dB");
    }

    if let Some((lat, lon, _)) = n.last_position {
        println!("   Position Updates: {}", n.positions);
        println!("   Last Position: {lat:.6}, {lon:.6}");
    }
}
