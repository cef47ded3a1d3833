pub mod analyze;
pub mod config;
pub mod init;
pub mod log;
