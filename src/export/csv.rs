// src/export/csv.rs

use crate::errors::AppResult;
use crate::export::model::{ContactExport, get_headers};
use crate::export::notify_export_success;
use crate::ui::messages::{info, warning};
use std::path::Path;

/// Export CSV. The header row is written explicitly so an empty selection
/// still produces a well-formed file.
pub(crate) fn export_csv(rows: &[ContactExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(get_headers())?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    if rows.is_empty() {
        warning("The selected session(s) hold no contacts: the CSV has only its header.");
    } else {
        info(format!("Contains {} contact record(s)", rows.len()));
    }
    Ok(())
}
