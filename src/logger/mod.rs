//! Logger
//!
//! A `tracing-subscriber` setup with:
//! - Console output with color control
//! - A sync log receiving every event at or above the configured level
//! - An error log receiving only `ERROR` events
//!
//! The two file paths come from the sync [`Configuration`](crate::config::Configuration).

pub mod config;
pub mod error;
pub mod writer;


// Re-export main types
pub use self::config::*;
pub use error::LoggerError;
pub use writer::LogFileWriter;

use std::io::IsTerminal;

use tracing_subscriber::{
    Layer, Registry, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Type-erased output layer
pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initialize the global logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    let layers = build_layers(&config)?;

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized {
            message: e.to_string(),
        })
}

/// Build the output layers described by `config`
///
/// File layers come before the console layer so ANSI codes never leak into
/// the files.
pub fn build_layers(config: &LoggerConfig) -> Result<Vec<BoxedLayer>, LoggerError> {
    config.validate()?;
    let level = config.parse_level()?;

    let mut layers = Vec::new();

    if let Some(ref files) = config.files {
        let sync_writer = LogFileWriter::new(&files.log_file)?;
        let error_writer = LogFileWriter::new(&files.error_log_file)?;

        layers.push(file_layer(sync_writer, config.format).with_filter(level).boxed());
        layers.push(
            file_layer(error_writer, config.format)
                .with_filter(LevelFilter::ERROR)
                .boxed(),
        );
    }

    if config.console.enabled {
        layers.push(console_layer(&config.console).with_filter(level).boxed());
    }

    Ok(layers)
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let is_tty = std::io::stderr().is_terminal();
    let use_ansi = config.colored && is_tty;

    fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(writer: LogFileWriter, format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(writer)
            .boxed(),
    }
}
