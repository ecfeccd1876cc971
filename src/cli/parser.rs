//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logger::LogFormat;

/// Inspect the configuration of the Steem block sync tool
#[derive(Parser, Debug)]
#[command(name = "steem-sync-config")]
#[command(about = "Inspect the configuration of the Steem block sync tool")]
#[command(long_about = "
Resolves the configuration used by the Steem block sync tool from its
built-in defaults, an optional TOML file and the MONGODB_URL, DB_NAME and
STEEMD_URL environment variables, then prints or checks it.

EXAMPLES:
    # Print the resolved configuration as JSON
    steem-sync-config show

    # Print it as TOML, layering a file over the defaults
    steem-sync-config --config sync.toml show --format toml

    # Point the sync at a single node and check the result
    STEEMD_URL=https://api.steemit.com steem-sync-config check
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute (defaults to `show`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// TOML file layered between the defaults and the environment. Keys it
    /// does not name keep their defaults. Falls back to
    /// `STEEM_SYNC_CONFIG_FILE` when not given.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also write logs to the configured sync and error log files
    #[arg(long)]
    pub log_files: bool,

    /// Format of the sync and error log files (used with `--log-files`)
    #[arg(long, value_enum, default_value_t = LogFileFormat::Full)]
    pub log_format: LogFileFormat,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the resolved configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Resolve and validate the configuration
    ///
    /// Exits with a non-zero status if any value is invalid.
    Check,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Show {
            format: OutputFormat::Json,
        }
    }
}

/// Output formats for `show`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    #[value(name = "json")]
    Json,
    #[value(name = "toml")]
    Toml,
}

/// Log file format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFileFormat {
    #[value(name = "full")]
    Full,
    #[value(name = "compact")]
    Compact,
    #[value(name = "json")]
    Json,
}

impl From<LogFileFormat> for LogFormat {
    fn from(format: LogFileFormat) -> Self {
        match format {
            LogFileFormat::Full => LogFormat::Full,
            LogFileFormat::Compact => LogFormat::Compact,
            LogFileFormat::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    /// The subcommand to run, falling back to `show`
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }

    /// Log level implied by `--verbose` / `--quiet`
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}
