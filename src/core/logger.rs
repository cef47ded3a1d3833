use crate::core::tracker::{ChangeKind, NodeTracker};
use crate::errors::AppResult;
use crate::models::contact::ContactRecord;
use crate::models::node::Position;
use crate::models::session::SessionLog;
use crate::source::NodeSource;
use crate::store::{SessionStore, TextLog};
use crate::ui::messages::warning;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use crate::utils::time::now_rfc3339;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// How often the interrupt flag is checked while waiting for the next tick.
const WAKE_SLICE: Duration = Duration::from_millis(100);

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The source returned nothing usable; no state changed.
    Skipped,
    Processed { new_contacts: usize, updates: usize },
}

impl TickOutcome {
    pub fn emitted(&self) -> usize {
        match self {
            TickOutcome::Skipped => 0,
            TickOutcome::Processed {
                new_contacts,
                updates,
            } => new_contacts + updates,
        }
    }
}

/// Logger loop state: the node source, change tracker, both logs and the
/// in-memory copy of the JSON log.
pub struct ContactLogger<S: NodeSource> {
    source: S,
    tracker: NodeTracker,
    text_log: TextLog,
    store: SessionStore,
    sessions: SessionLog,
    require_signal: bool,
    quiet: bool,
    my_node: Option<String>,
    observer: Option<Position>,
}

impl<S: NodeSource> ContactLogger<S> {
    /// Open both logs and start a new session.
    ///
    /// Any failure here (unwritable paths, corrupt JSON log) is fatal.
    pub fn start(
        source: S,
        text_log_path: &str,
        store: SessionStore,
        require_signal: bool,
    ) -> AppResult<Self> {
        let now = now_rfc3339();

        // 1️⃣ text log
        let mut text_log = TextLog::open(text_log_path, &now)?;

        // 2️⃣ JSON log + new session
        let mut sessions = store.load()?;
        if sessions.begin_session(now.clone()) {
            warning("Previous session was still marked active: closed it.");
        }
        store.save(&sessions)?;

        text_log.session_started(&now)?;

        Ok(Self {
            source,
            tracker: NodeTracker::new(),
            text_log,
            store,
            sessions,
            require_signal,
            quiet: false,
            my_node: None,
            observer: None,
        })
    }

    /// Suppress the per-record console lines.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Look for the local radio (id or short name) in every poll and stamp
    /// its position on each record.
    pub fn observer(mut self, my_node: Option<String>) -> Self {
        self.my_node = my_node.filter(|id| !id.trim().is_empty());
        self
    }

    /// Last known fix of the local radio.
    pub fn observer_position(&self) -> Option<Position> {
        self.observer
    }

    /// One poll: query, diff, append, then rewrite the JSON log.
    pub fn tick(&mut self) -> AppResult<TickOutcome> {
        let Some(reports) = self.source.poll()? else {
            log::debug!("Tick skipped: no usable node data");
            return Ok(TickOutcome::Skipped);
        };

        // The local node usually reports no signal, so look it up before filtering.
        if let Some(my_node) = &self.my_node {
            match reports.iter().find(|r| r.is_local(my_node)) {
                Some(local) => match local.position() {
                    Some(fix) => self.observer = Some(fix),
                    None => log::debug!("Local node {my_node} has no fix, keeping the last one"),
                },
                None => log::debug!("Local node {my_node} not in this poll"),
            }
        }

        let require_signal = self.require_signal;
        let mut new_contacts = 0;
        let mut updates = 0;

        for report in reports.iter().filter(|r| !require_signal || r.has_signal()) {
            let Some(kind) = self.tracker.observe(report) else {
                continue;
            };

            let record = ContactRecord::from_report(report, now_rfc3339(), kind.is_new())
                .observed_from(self.observer);

            self.text_log.append(kind, &record)?;
            if !self.quiet {
                print_record(kind, &record);
            }
            self.sessions.record(record)?;

            match kind {
                ChangeKind::NewContact => new_contacts += 1,
                ChangeKind::Update => updates += 1,
            }
        }

        self.store.save(&self.sessions)?;

        log::debug!(
            "Tick: {} node(s) reported, {new_contacts} new, {updates} updated",
            reports.len()
        );

        Ok(TickOutcome::Processed {
            new_contacts,
            updates,
        })
    }

    /// Tick every `interval` until `running` is cleared.
    pub fn run(&mut self, interval: Duration, running: &AtomicBool) -> AppResult<()> {
        while running.load(Ordering::SeqCst) {
            if self.tick()? == TickOutcome::Skipped {
                log::warn!("Node query returned no usable data, waiting for next poll");
            }
            sleep_while_running(interval, running);
        }
        Ok(())
    }

    /// Close the session and flush the JSON log one last time.
    /// Returns the number of distinct nodes seen in this run.
    pub fn finish(mut self) -> AppResult<usize> {
        let now = now_rfc3339();

        self.sessions.close_active(now.clone());
        self.store.save(&self.sessions)?;
        self.text_log.session_ended(&now, self.tracker.len())?;

        Ok(self.tracker.len())
    }

    pub fn sessions(&self) -> &SessionLog {
        &self.sessions
    }

    pub fn unique_nodes(&self) -> usize {
        self.tracker.len()
    }
}

fn sleep_while_running(interval: Duration, running: &AtomicBool) {
    let deadline = Instant::now() + interval;

    while running.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep(WAKE_SLICE.min(deadline - now));
    }
}

fn print_record(kind: ChangeKind, record: &ContactRecord) {
    let rssi = record
        .rssi
        .map(|r| r.to_string())
        .unwrap_or_else(|| "N/A".into());
    let snr = record
        .snr
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".into());

    match kind {
        ChangeKind::NewContact => println!(
            "\n🆕 {GREEN}NEW CONTACT{RESET}: {} [RSSI: {rssi} dBm, SNR: {snr} dB]",
            record.display_name()
        ),
        ChangeKind::Update => println!(
            "📡 {YELLOW}Update{RESET}: {} [RSSI: {rssi} dBm, SNR: {snr} dB]",
            record.short_name
        ),
    }

    if record.position().is_some() {
        println!("   📍 {CYAN}Position{RESET}: {}", record.position_label());
    }
    if let Some(observer) = record.observer_label() {
        println!("   🧭 {CYAN}Observer{RESET}: {observer}");
    }
}
