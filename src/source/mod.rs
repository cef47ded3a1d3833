//! Where node reports come from.

pub mod command;
pub mod parse;
pub mod table;

pub use command::CommandSource;

use crate::errors::AppResult;
use crate::models::node::NodeReport;

/// A poll-able source of visible mesh nodes.
pub trait NodeSource {
    /// Returns the nodes visible right now.
    ///
    /// `Ok(None)` is a tolerated transient failure (noisy or missing output):
    /// the logger skips the tick without touching any state. `Err` is fatal.
    fn poll(&mut self) -> AppResult<Option<Vec<NodeReport>>>;
}
