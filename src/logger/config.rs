//! Configuration types for the logger

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

use crate::config::Configuration;
use crate::logger::error::LoggerError;

/// Main logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// One of: trace, debug, info, warn, error
    pub level: String,
    pub console: ConsoleConfig,
    /// Sync and error log files; `None` logs to the console only
    pub files: Option<LogFiles>,
    /// Format used for both log files
    pub format: LogFormat,
}

impl LoggerConfig {
    /// Console-only logging at the given level
    pub fn console_only<S: Into<String>>(level: S) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Also write to the log files named by the sync configuration
    pub fn with_files(mut self, files: LogFiles) -> Self {
        self.files = Some(files);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LoggerError> {
        self.parse_level()?;

        if let Some(ref files) = self.files {
            files.validate()?;
        }

        if !self.console.enabled && self.files.is_none() {
            return Err(LoggerError::config(
                "At least one output (console or file) must be enabled",
            ));
        }

        Ok(())
    }

    /// Parse the level string into a filter
    pub fn parse_level(&self) -> Result<LevelFilter, LoggerError> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(LevelFilter::TRACE),
            "debug" => Ok(LevelFilter::DEBUG),
            "info" => Ok(LevelFilter::INFO),
            "warn" => Ok(LevelFilter::WARN),
            "error" => Ok(LevelFilter::ERROR),
            _ => Err(LoggerError::config(format!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                self.level
            ))),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: ConsoleConfig::default(),
            files: None,
            format: LogFormat::default(),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// Paths of the sync log and the error-only log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFiles {
    /// Receives every event at or above the configured level
    pub log_file: PathBuf,
    /// Receives only `ERROR` events
    pub error_log_file: PathBuf,
}

impl LogFiles {
    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.log_file.as_os_str().is_empty() {
            return Err(LoggerError::config("Log file path cannot be empty"));
        }
        if self.error_log_file.as_os_str().is_empty() {
            return Err(LoggerError::config("Error log file path cannot be empty"));
        }
        Ok(())
    }
}

impl From<&Configuration> for LogFiles {
    fn from(config: &Configuration) -> Self {
        Self {
            log_file: PathBuf::from(&config.log_file),
            error_log_file: PathBuf::from(&config.error_log_file),
        }
    }
}

/// Log file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::format(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}
