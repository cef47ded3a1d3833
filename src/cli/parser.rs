use clap::{Parser, Subcommand};

/// Command-line interface definition for rMeshLogger
/// CLI application to log Meshtastic node contacts while wardriving
#[derive(Parser)]
#[command(
    name = "rmeshlogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small wardriving CLI: log Meshtastic node contacts, then analyze and export sessions",
    long_about = None
)]
pub struct Cli {
    /// Override the JSON session log path
    #[arg(global = true, short = 'j', long = "json", value_name = "FILE")]
    pub json: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Poll the radio and log new or changed node contacts until interrupted
    Log {
        /// Serial port (e.g. /dev/ttyUSB0 or COM3)
        #[arg(short = 'p', long = "port")]
        port: Option<String>,

        /// Polling interval in seconds
        #[arg(short = 'i', long = "interval", value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// Text log file path
        #[arg(short = 'l', long = "log", value_name = "FILE")]
        log: Option<String>,

        /// Node-query executable (default from config: meshtastic)
        #[arg(long = "command", value_name = "CMD")]
        command: Option<String>,

        /// Do not print a line per recorded contact
        #[arg(short = 'q', long = "quiet")]
        quiet: bool,

        /// Id or short name of the local radio; its position is stored with every contact
        #[arg(long = "my-node", value_name = "ID")]
        my_node: Option<String>,
    },

    /// Analyze logged sessions, or export them to KML / CSV
    Analyze {
        /// Session index to analyze or export (zero-based, default: last)
        #[arg(short = 's', long = "session")]
        session: Option<usize>,

        #[arg(long = "summary", help = "Show an overall summary of all sessions")]
        summary: bool,

        #[arg(long = "kml", value_name = "FILE", help = "Export positioned contacts to KML")]
        kml: Option<String>,

        #[arg(long = "csv", value_name = "FILE", help = "Export contacts to CSV")]
        csv: Option<String>,

        #[arg(
            long = "all",
            conflicts_with = "session",
            help = "Select every session (for exports and the session view)"
        )]
        all: bool,

        #[arg(long, short = 'f', help = "Overwrite existing export files without asking")]
        force: bool,
    },
}
