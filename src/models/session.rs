use super::contact::ContactRecord;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One continuous logger run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub contacts: Vec<ContactRecord>,
}

impl Session {
    pub fn open(start_time: String) -> Self {
        Self {
            start_time,
            end_time: None,
            active: true,
            contacts: Vec::new(),
        }
    }

    pub fn close(&mut self, end_time: String) {
        self.active = false;
        self.end_time = Some(end_time);
    }

    pub fn unique_nodes(&self) -> usize {
        self.contacts
            .iter()
            .map(|c| c.node_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Completed" }
    }
}

/// Root of the JSON session log: `{ "sessions": [...] }`.
///
/// Sessions are append-only; only the last one may still be active and
/// receive contacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl SessionLog {
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn total_contacts(&self) -> usize {
        self.sessions.iter().map(|s| s.contacts.len()).sum()
    }

    /// Opens a new active session.
    ///
    /// A last session still marked active belongs to a run that never shut
    /// down cleanly: it is closed at its last recorded timestamp first.
    /// Returns `true` when such a stale session was closed.
    pub fn begin_session(&mut self, start_time: String) -> bool {
        let mut closed_stale = false;

        if let Some(last) = self.sessions.last_mut()
            && last.active
        {
            let end = last
                .contacts
                .last()
                .map(|c| c.timestamp.clone())
                .unwrap_or_else(|| last.start_time.clone());
            last.close(end);
            closed_stale = true;
        }

        self.sessions.push(Session::open(start_time));
        closed_stale
    }

    /// Appends a contact to the active session.
    pub fn record(&mut self, contact: ContactRecord) -> AppResult<()> {
        match self.sessions.last_mut() {
            Some(session) if session.active => {
                session.contacts.push(contact);
                Ok(())
            }
            _ => Err(AppError::Other(
                "no active session to record the contact into".into(),
            )),
        }
    }

    /// Marks the active session (if any) as finished.
    pub fn close_active(&mut self, end_time: String) {
        if let Some(last) = self.sessions.last_mut()
            && last.active
        {
            last.close(end_time);
        }
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.sessions.last().filter(|s| s.active)
    }

    /// Zero-based lookup.
    pub fn session(&self, index: usize) -> AppResult<&Session> {
        self.sessions.get(index).ok_or(AppError::SessionNotFound {
            index,
            total: self.sessions.len(),
        })
    }

    /// Index of the most recent session, active or closed.
    pub fn last_index(&self) -> Option<usize> {
        self.sessions.len().checked_sub(1)
    }
}
