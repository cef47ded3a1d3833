// src/export/mod.rs

mod csv;
mod fs_utils;
pub mod kml;
pub mod logic;
mod model;

pub use kml::build_kml;
pub use logic::ExportLogic;
pub use model::ContactExport;

use crate::ui::messages::success;
use std::path::Path;

/// Shared completion message for every export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Kml,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Kml => "kml",
            ExportFormat::Csv => "csv",
        }
    }
}
