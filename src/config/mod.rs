use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde_str;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Executable of the radio's command-line tool
    #[serde(default = "default_node_command")]
    pub node_command: String,
    #[serde(default = "default_node_args")]
    pub node_args: Vec<String>,
    /// Serial port passed as `--port`; auto-detected by the tool when absent
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_json_log")]
    pub json_log: String,
    /// Ignore nodes reporting neither RSSI nor SNR (the local radio)
    #[serde(default = "default_require_signal")]
    pub require_signal: bool,
    /// Local radio (id or short name) whose position is recorded as the observer's
    #[serde(default)]
    pub my_node: Option<String>,
}

fn default_node_command() -> String {
    "meshtastic".to_string()
}
fn default_node_args() -> Vec<String> {
    vec!["--nodes".into(), "--output".into(), "json".into()]
}
fn default_interval_secs() -> u64 {
    5
}
fn default_log_file() -> String {
    "meshtastic_contacts.log".to_string()
}
fn default_json_log() -> String {
    "meshtastic_contacts.json".to_string()
}
fn default_require_signal() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_command: default_node_command(),
            node_args: default_node_args(),
            port: None,
            interval_secs: default_interval_secs(),
            log_file: default_log_file(),
            json_log: default_json_log(),
            require_signal: default_require_signal(),
            my_node: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rmeshlogger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rmeshlogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rmeshlogger.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))?;

        cfg.log_file = expand_tilde_str(&cfg.log_file);
        cfg.json_log = expand_tilde_str(&cfg.json_log);

        if cfg.interval_secs == 0 {
            return Err(AppError::Config("interval_secs must be at least 1".into()));
        }

        Ok(cfg)
    }

    /// Create the config directory and write a default config file.
    /// An existing file is left untouched. Returns `true` when a file was written.
    pub fn init_all() -> AppResult<bool> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let file = Self::config_file();
        if file.exists() {
            return Ok(false);
        }

        let yaml = serde_yaml::to_string(&Self::default())?;
        fs::write(&file, yaml)?;
        Ok(true)
    }
}
