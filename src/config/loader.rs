//! Configuration loading
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults ([`Configuration::default`])
//! 2. An optional TOML file ([`ConfigLoader::with_file`])
//! 3. Environment overrides (`MONGODB_URL`, `DB_NAME`, `STEEMD_URL`)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use config::{Config, File, FileFormat};
use tracing::debug;

use crate::config::environment::{self, EnvVars};
use crate::config::error::ConfigError;
use crate::config::settings::Configuration;

static CONFIGURATION: OnceLock<Configuration> = OnceLock::new();

/// Build the configuration from defaults and the given environment
///
/// Never fails: absent or empty variables keep their default and any other
/// value is taken as-is.
pub fn load_configuration(env: &EnvVars) -> Configuration {
    Configuration::default().with_overrides(env)
}

/// Process-wide configuration
///
/// Built from the process environment on first access and shared read-only
/// afterwards.
pub fn configuration() -> &'static Configuration {
    CONFIGURATION.get_or_init(|| load_configuration(&EnvVars::from_process()))
}

/// Loader that layers a TOML file between the defaults and the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Optional TOML file
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader without a file layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader reading the given TOML file
    pub fn with_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_file: Some(path.into()),
        }
    }

    /// Loader configured from `STEEM_SYNC_CONFIG_FILE`, if set
    pub fn from_env(env: &EnvVars) -> Self {
        Self {
            config_file: env.get(environment::CONFIG_FILE).map(PathBuf::from),
        }
    }

    /// The configured file, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load the configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configured file does not exist
    /// - The file cannot be parsed as TOML
    /// - A value in the file has the wrong type
    pub fn load(&self, env: &EnvVars) -> Result<Configuration, ConfigError> {
        let Some(ref path) = self.config_file else {
            return Ok(load_configuration(env));
        };

        let config = self.build_config(path)?;
        let from_file: Configuration = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        Ok(from_file.with_overrides(env))
    }

    fn build_config(&self, path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        debug!(path = %path.display(), "Loading configuration file");

        // Defaults go in as the lowest layer so a partial file only touches
        // the keys it names.
        let defaults = Config::try_from(&Configuration::default())?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()
            .map_err(ConfigError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Helper to create a temporary directory holding one config file
    fn setup_config_file(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("sync.toml");
        fs::write(&path, content).expect("Failed to write config file");
        (temp_dir, path)
    }

    #[test]
    fn test_load_configuration_defaults() {
        let config = load_configuration(&EnvVars::empty());
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_load_configuration_db_name() {
        let env = EnvVars::from_pairs([(environment::DB_NAME, "TestDB")]);
        let config = load_configuration(&env);
        assert_eq!(config.db_name, "TestDB");
        assert_eq!(
            config,
            Configuration {
                db_name: "TestDB".to_string(),
                ..Configuration::default()
            }
        );
    }

    #[test]
    fn test_load_configuration_mongodb_url() {
        let env = EnvVars::from_pairs([(environment::MONGODB_URL, "mongodb://example:27017/")]);
        let config = load_configuration(&env);
        assert_eq!(
            config,
            Configuration {
                mongodb_url: "mongodb://example:27017/".to_string(),
                ..Configuration::default()
            }
        );
    }

    #[test]
    fn test_load_configuration_steemd_url() {
        let env = EnvVars::from_pairs([(environment::STEEMD_URL, "https://custom.node")]);
        let config = load_configuration(&env);
        assert_eq!(config.steemd_nodes, vec!["https://custom.node".to_string()]);
        assert_eq!(config.db_name, "SteemDB");
    }

    #[test]
    fn test_load_configuration_empty_steemd_url() {
        let env = EnvVars::from_pairs([(environment::STEEMD_URL, "")]);
        let config = load_configuration(&env);
        assert_eq!(config.steemd_nodes.len(), 7);
    }

    #[test]
    fn test_load_configuration_is_idempotent() {
        let env = EnvVars::from_pairs([
            (environment::DB_NAME, "TestDB"),
            (environment::STEEMD_URL, "https://custom.node"),
        ]);
        assert_eq!(load_configuration(&env), load_configuration(&env));
    }

    #[test]
    fn test_global_configuration_is_shared() {
        let first = configuration();
        let second = configuration();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_loader_without_file() {
        let loader = ConfigLoader::new();
        assert!(loader.config_file().is_none());
        let config = loader.load(&EnvVars::empty()).expect("Should load defaults");
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_loader_from_env() {
        let env = EnvVars::from_pairs([(environment::CONFIG_FILE, "/etc/steem/sync.toml")]);
        let loader = ConfigLoader::from_env(&env);
        assert_eq!(loader.config_file(), Some(Path::new("/etc/steem/sync.toml")));

        let env = EnvVars::from_pairs([(environment::CONFIG_FILE, "")]);
        assert!(ConfigLoader::from_env(&env).config_file().is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let loader = ConfigLoader::with_file(temp_dir.path().join("missing.toml"));

        let result = loader.load(&EnvVars::empty());
        match result {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("missing.toml")),
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_partial_file() {
        let (_dir, path) = setup_config_file(
            r#"
collection_name = "Blocks"
parallel_batch_size = 25
"#,
        );

        let config = ConfigLoader::with_file(&path)
            .load(&EnvVars::empty())
            .expect("Should load settings");

        assert_eq!(config.collection_name, "Blocks");
        assert_eq!(config.parallel_batch_size, 25);

        // Keys not in the file come from the defaults
        assert_eq!(config.db_name, "SteemDB");
        assert_eq!(config.parallel_sync_threshold, 100);
        assert_eq!(config.steemd_nodes.len(), 7);
    }

    #[test]
    fn test_file_node_list_replaces_defaults() {
        let (_dir, path) = setup_config_file(
            r#"
steemd_nodes = ["https://a.node", "https://b.node"]
"#,
        );

        let config = ConfigLoader::with_file(&path)
            .load(&EnvVars::empty())
            .expect("Should load settings");

        assert_eq!(config.steemd_nodes, vec!["https://a.node", "https://b.node"]);
    }

    #[test]
    fn test_env_overrides_file() {
        let (_dir, path) = setup_config_file(
            r#"
db_name = "FromFile"
mongodb_url = "mongodb://file:27017/"
steemd_nodes = ["https://a.node", "https://b.node"]
"#,
        );

        let env = EnvVars::from_pairs([
            (environment::DB_NAME, "FromEnv"),
            (environment::STEEMD_URL, "https://env.node"),
        ]);
        let config = ConfigLoader::with_file(&path)
            .load(&env)
            .expect("Should load settings");

        assert_eq!(config.db_name, "FromEnv");
        assert_eq!(config.steemd_nodes, vec!["https://env.node"]);
        // Not overridden by the environment
        assert_eq!(config.mongodb_url, "mongodb://file:27017/");
    }

    #[test]
    fn test_load_malformed_file() {
        let (_dir, path) = setup_config_file("db_name = [unterminated");

        let result = ConfigLoader::with_file(&path).load(&EnvVars::empty());
        assert!(matches!(result, Err(ConfigError::Other(_))));
    }

    #[test]
    fn test_load_wrong_type() {
        let (_dir, path) = setup_config_file("parallel_batch_size = \"many\"\n");

        let result = ConfigLoader::with_file(&path).load(&EnvVars::empty());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_non_utf8_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir
            .path()
            .join(OsStr::from_bytes(b"sync-\xff.toml"));
        fs::write(&path, "db_name = \"NonUtf8\"\n").expect("Failed to write config file");

        let config = ConfigLoader::with_file(&path)
            .load(&EnvVars::empty())
            .expect("Should load settings from a non-UTF-8 path");
        assert_eq!(config.db_name, "NonUtf8");
    }
}
