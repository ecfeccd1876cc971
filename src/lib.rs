//! Steem block sync configuration
//!
//! Settings consumed by the Steem block synchronization tool: API nodes,
//! MongoDB connection, parallel sync tuning and log file paths.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod logger;

pub use self::config::{Configuration, EnvVars, configuration, load_configuration};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
