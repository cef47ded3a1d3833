//! Flat, file-based persistence: the JSON session log and the text log.

pub mod session_store;
pub mod text_log;

pub use session_store::SessionStore;
pub use text_log::TextLog;
