//! Command executor for dispatching CLI commands

use anyhow::Context;
use tracing::{error, info};

use super::parser::{Cli, Commands, OutputFormat};
use crate::config::{ConfigError, ConfigLoader, Configuration, EnvVars};

/// Resolve the configuration the CLI should operate on
///
/// `--config` adds a file layer, falling back to `STEEM_SYNC_CONFIG_FILE`
/// (empty counts as unset). The environment is applied on top.
pub fn resolve_configuration(cli: &Cli, env: &EnvVars) -> Result<Configuration, ConfigError> {
    let loader = match cli.config {
        Some(ref path) => ConfigLoader::with_file(path),
        None => ConfigLoader::from_env(env),
    };
    loader.load(env)
}

/// Execute a CLI command against a resolved configuration
///
/// Returns the text to print on stdout.
///
/// # Errors
/// - Serialization failures for `show`
/// - The first validation failure for `check`
pub fn execute_command(cli: &Cli, config: &Configuration) -> anyhow::Result<String> {
    match cli.command() {
        Commands::Show { format } => render(config, format),
        Commands::Check => check(config),
    }
}

/// Serialize the configuration in the requested format
pub fn render(config: &Configuration, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(config)
            .context("Failed to serialize configuration as JSON")?,
        OutputFormat::Toml => {
            toml::to_string_pretty(config).context("Failed to serialize configuration as TOML")?
        }
    };
    Ok(rendered)
}

fn check(config: &Configuration) -> anyhow::Result<String> {
    if let Err(e) = config.validate() {
        error!(error = %e, "Configuration is invalid");
        return Err(e.into());
    }

    info!(nodes = config.steemd_nodes.len(), "Configuration is valid");

    let mut report = String::from("✓ Configuration is valid\n");
    report.push_str(&format!(
        "✓ {} Steem API node(s), primary: {}\n",
        config.steemd_nodes.len(),
        config.primary_node().unwrap_or("-")
    ));
    report.push_str(&format!(
        "✓ MongoDB database '{}' collection '{}'\n",
        config.db_name, config.collection_name
    ));
    report.push_str(&format!(
        "✓ Parallel sync above {} blocks, {} blocks per batch\n",
        config.parallel_sync_threshold, config.parallel_batch_size
    ));
    report.push_str(&format!(
        "✓ Logging to '{}' (errors: '{}')\n",
        config.log_file, config.error_log_file
    ));
    Ok(report)
}
