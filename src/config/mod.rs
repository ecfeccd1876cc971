//! Configuration management for the Steem block sync tool
//!
//! # Configuration Priority (lowest to highest)
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config` or `STEEM_SYNC_CONFIG_FILE`)
//! 3. `MONGODB_URL`, `DB_NAME` and `STEEMD_URL` environment variables
//!
//! An environment variable set to the empty string counts as unset.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

// Re-export public types
pub use environment::EnvVars;
pub use error::ConfigError;
pub use loader::{ConfigLoader, configuration, load_configuration};
pub use settings::Configuration;
