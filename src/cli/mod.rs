//! CLI module
//!
//! - Argument parsing with clap
//! - Configuration resolution (defaults, `--config` file, environment)
//! - `show` and `check` command execution

pub mod executor;
pub mod parser;

// Re-export public types for convenience
pub use executor::{execute_command, render, resolve_configuration};
pub use parser::{Cli, Commands, LogFileFormat, OutputFormat};

use tracing_subscriber::{Registry, layer::SubscriberExt};

use crate::config::{Configuration, EnvVars};
use crate::logger::{LogFiles, LoggerConfig, LoggerError, build_layers, init_logger};

/// Build the logger configuration implied by the CLI flags
///
/// `--log-files` adds the sync and error log files named by `config`.
pub fn logger_config(cli: &Cli, config: &Configuration) -> LoggerConfig {
    let logger = LoggerConfig::console_only(cli.log_level());
    if cli.log_files {
        LoggerConfig {
            format: cli.log_format.into(),
            ..logger.with_files(LogFiles::from(config))
        }
    } else {
        logger
    }
}

/// Resolve the configuration with a console logger already in place
///
/// The log file paths are only known once the configuration is resolved, so
/// resolution runs under a scoped console-only subscriber. Override events
/// show up with `--verbose`.
pub fn resolve_configuration_logged(cli: &Cli, env: &EnvVars) -> anyhow::Result<Configuration> {
    let layers = build_layers(&LoggerConfig::console_only(cli.log_level()))?;
    let subscriber = Registry::default().with(layers);
    let config = tracing::subscriber::with_default(subscriber, || {
        resolve_configuration(cli, env)
    })?;
    Ok(config)
}

/// Initialize logging for a CLI run
pub fn init_logger_from_cli(cli: &Cli, config: &Configuration) -> Result<(), LoggerError> {
    init_logger(logger_config(cli, config))
}
