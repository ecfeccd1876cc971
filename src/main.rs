use clap::Parser;

use steem_sync_config::EnvVars;
use steem_sync_config::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let env = EnvVars::from_process();

    let config = cli::resolve_configuration_logged(&cli, &env)?;
    cli::init_logger_from_cli(&cli, &config)?;

    tracing::debug!(version = steem_sync_config::pkg_version(), "Configuration resolved");

    let output = cli::execute_command(&cli, &config)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}
