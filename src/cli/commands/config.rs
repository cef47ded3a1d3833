use crate::config::Config;
use crate::errors::{AppError, AppResult};

use crate::cli::parser::Commands;
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            if !path.exists() {
                Config::init_all()?;
                info(format!("Created default configuration at {}", path.display()));
            }

            // Default editor from the environment, then per platform
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            // --editor wins when given
            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            if open_editor(&editor_to_use, &path) {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
            } else if editor_to_use != default_editor {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));

                if !open_editor(&default_editor, &path) {
                    return Err(AppError::Editor(format!(
                        "neither '{}' nor the fallback '{}' could be run",
                        editor_to_use, default_editor
                    )));
                }
                success(format!(
                    "Configuration file edited successfully using fallback '{}'",
                    default_editor
                ));
            } else {
                return Err(AppError::Editor(format!(
                    "editor '{}' could not be run",
                    editor_to_use
                )));
            }
        }

        if !*print_config && !*edit_config {
            info("Nothing to do: use --print or --edit.");
        }
    }

    Ok(())
}

/// `true` when the editor ran and exited cleanly.
fn open_editor(editor: &str, path: &Path) -> bool {
    match Command::new(editor).arg(path).status() {
        Ok(status) => status.success(),
        Err(e) => {
            log::debug!("Cannot start editor '{editor}': {e}");
            false
        }
    }
}
