//! Unified application error type.
//! All modules (source, store, core, export, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Node-query command
    // ---------------------------
    #[error("Node query command not found: {0}")]
    CommandNotFound(String),

    #[error("Cannot install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    // ---------------------------
    // Session log
    // ---------------------------
    #[error("No sessions found in {0}")]
    NoSessions(String),

    #[error("No such session: index {index} (log holds {total} session(s), valid range 0..{total})")]
    SessionNotFound { index: usize, total: usize },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot edit the configuration file: {0}")]
    Editor(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
