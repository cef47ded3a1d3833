// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::csv::export_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::kml::export_kml;
use crate::export::model::ContactExport;
use crate::models::contact::ContactRecord;
use crate::models::session::Session;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the contacts of the already-resolved sessions.
    ///
    /// Sessions are resolved by the caller before anything touches the
    /// filesystem, so a bad selection never leaves a file behind.
    pub fn export(
        sessions: &[(usize, &Session)],
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        ensure_writable(path, force)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let contacts: Vec<&ContactRecord> = sessions
            .iter()
            .flat_map(|(_, s)| s.contacts.iter())
            .collect();

        log::debug!(
            "Exporting {} contact(s) from {} session(s) as {}",
            contacts.len(),
            sessions.len(),
            format.as_str()
        );

        match format {
            ExportFormat::Kml => export_kml(&contacts, path)?,
            ExportFormat::Csv => {
                let rows: Vec<ContactExport> =
                    contacts.iter().map(|c| ContactExport::from(*c)).collect();
                export_csv(&rows, path)?
            }
        }

        Ok(())
    }
}
