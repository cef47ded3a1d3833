use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logger::ContactLogger;
use crate::errors::AppResult;
use crate::source::CommandSource;
use crate::store::SessionStore;
use crate::ui::messages::{header, info, success};
use crate::utils::path::expand_tilde_str;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Handle the `log` command: run the logger loop until Ctrl+C.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log {
        port,
        interval,
        log: log_flag,
        command,
        quiet,
        my_node,
    } = cmd
    {
        // 1️⃣ CLI flags override the config
        let port = port.clone().or_else(|| cfg.port.clone());
        let interval = Duration::from_secs(interval.unwrap_or(cfg.interval_secs));
        let text_log = log_flag
            .as_deref()
            .map(expand_tilde_str)
            .unwrap_or_else(|| cfg.log_file.clone());
        let program = command.as_deref().unwrap_or(&cfg.node_command);
        let my_node = my_node.clone().or_else(|| cfg.my_node.clone());

        let source = CommandSource::new(program, &cfg.node_args, port.clone());

        header("Meshtastic Contact Logger");
        println!("Port            : {}", port.as_deref().unwrap_or("Auto-detect"));
        println!("Node command    : {}", source.describe());
        println!("Log file        : {}", text_log);
        println!("JSON log        : {}", cfg.json_log);
        println!("Polling interval: {} seconds", interval.as_secs());
        println!("Observer node   : {}", my_node.as_deref().unwrap_or("None"));
        println!("\nPress Ctrl+C to stop\n");

        // 2️⃣ Ctrl+C / SIGTERM only flip the flag; the loop exits between ticks
        let running = Arc::new(AtomicBool::new(true));
        {
            let running = Arc::clone(&running);
            ctrlc::set_handler(move || {
                log::info!("Interrupt received, shutting down…");
                running.store(false, Ordering::SeqCst);
            })?;
        }

        // 3️⃣ Open logs and start the session (fatal on failure)
        let store = SessionStore::new(&cfg.json_log);
        let mut logger = ContactLogger::start(source, &text_log, store, cfg.require_signal)?
            .quiet(*quiet)
            .observer(my_node);

        // 4️⃣ Loop
        let result = logger.run(interval, &running);

        // 5️⃣ Close the session even when the loop failed, then report the first error
        println!("\n\nShutting down logger...");
        let unique = logger.finish();
        result?;
        let unique = unique?;

        success("Logging session ended");
        info(format!("Total unique contacts: {unique}"));
    }

    Ok(())
}
