use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::analyze::{AnalyzeLogic, SessionSelection};
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::store::SessionStore;

/// Handle the `analyze` command. Read-only on the JSON log.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Analyze {
        session,
        summary,
        kml,
        csv,
        all,
        force,
    } = cmd
    {
        let store = SessionStore::new(&cfg.json_log);
        let log = store.load_existing()?;

        // Resolve the selection before any output file is touched
        let selection = SessionSelection::from_flags(*session, *all);
        let selected = selection.resolve(&log)?;

        if *summary {
            AnalyzeLogic::print_summary(&log);
        }

        if let Some(file) = kml {
            ExportLogic::export(&selected, ExportFormat::Kml, file, *force)?;
        }

        if let Some(file) = csv {
            ExportLogic::export(&selected, ExportFormat::Csv, file, *force)?;
        }

        if !*summary && kml.is_none() && csv.is_none() {
            for (index, s) in &selected {
                AnalyzeLogic::print_session(*index, s);
            }
        }
    }

    Ok(())
}
