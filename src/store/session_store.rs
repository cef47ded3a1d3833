//! JSON session log on disk.

use crate::errors::{AppError, AppResult};
use crate::models::session::SessionLog;
use std::fs;
use std::path::PathBuf;

/// The JSON log file, rewritten wholesale on every save.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the whole log. A missing file is an empty log; a corrupt one is
    /// an error (never silently replaced, it holds past sessions).
    pub fn load(&self) -> AppResult<SessionLog> {
        if !self.path.exists() {
            return Ok(SessionLog::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SessionLog::default());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Load for read-only analysis: a missing or empty log is reported as
    /// "no sessions".
    pub fn load_existing(&self) -> AppResult<SessionLog> {
        let log = self.load()?;
        if log.is_empty() {
            return Err(AppError::NoSessions(self.path.display().to_string()));
        }
        Ok(log)
    }

    /// Serialize the full structure to `<file>.tmp`, then rename over the log.
    pub fn save(&self, log: &SessionLog) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(log)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
