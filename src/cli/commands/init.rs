use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Creates the config directory and a default configuration file, then
/// prints where the logs will be written.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let path = Config::config_file();

    println!("⚙️  Initializing rMeshLogger…");

    if Config::init_all()? {
        success(format!("Config file written: {}", path.display()));
    } else {
        info(format!("Config file already present: {}", path.display()));
    }

    println!("📄 Config file : {}", path.display());
    println!("📝 Text log    : {}", cfg.log_file);
    println!("🗂️  JSON log    : {}", cfg.json_log);
    println!("📡 Node command: {} {}", cfg.node_command, cfg.node_args.join(" "));

    success("rMeshLogger initialization completed!");
    Ok(())
}
