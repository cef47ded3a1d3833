pub mod analyze;
pub mod logger;
pub mod stats;
pub mod tracker;
