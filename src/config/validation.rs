//! Configuration validation logic
//!
//! Loading never validates. Callers that want the record's invariants
//! checked (the `check` command, a sync engine at startup) call
//! [`Configuration::validate`] explicitly.

use validator::ValidateUrl;

use crate::config::error::ConfigError;
use crate::config::settings::Configuration;

/// Schemes accepted for Steem API nodes
const VALID_NODE_SCHEMES: &[&str] = &["http://", "https://"];

/// Schemes accepted for the MongoDB connection string
const VALID_MONGODB_SCHEMES: &[&str] = &["mongodb://", "mongodb+srv://"];

impl Configuration {
    /// Validate the configuration
    ///
    /// # Validation Rules
    /// - At least one node must be configured
    /// - Every node must be a valid HTTP(S) URL
    /// - MongoDB URL must use the `mongodb://` or `mongodb+srv://` scheme
    /// - Database, collection and log file names must not be blank
    /// - Batch size and sync threshold must be greater than 0
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_nodes()?;
        self.validate_database()?;
        self.validate_sync()?;
        self.validate_log_files()?;
        Ok(())
    }

    fn validate_nodes(&self) -> Result<(), ConfigError> {
        if self.steemd_nodes.is_empty() {
            return Err(ConfigError::validation(
                "steemd_nodes",
                "At least one Steem API node is required.",
            ));
        }

        for (index, node) in self.steemd_nodes.iter().enumerate() {
            if !has_node_scheme(node) || !node.validate_url() {
                return Err(ConfigError::validation(
                    format!("steemd_nodes[{}]", index),
                    format!(
                        "Invalid node URL '{}'. Expected an http:// or https:// URL.",
                        node
                    ),
                ));
            }
        }

        Ok(())
    }

    fn validate_database(&self) -> Result<(), ConfigError> {
        if self.mongodb_url.trim().is_empty() {
            return Err(ConfigError::validation(
                "mongodb_url",
                "MongoDB URL is required.",
            ));
        }

        if !VALID_MONGODB_SCHEMES
            .iter()
            .any(|scheme| self.mongodb_url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "mongodb_url",
                format!(
                    "Invalid MongoDB URL '{}'. Expected scheme: {}",
                    self.mongodb_url,
                    VALID_MONGODB_SCHEMES.join(" or ")
                ),
            ));
        }

        if self.db_name.trim().is_empty() {
            return Err(ConfigError::validation(
                "db_name",
                "Database name cannot be empty.",
            ));
        }

        if self.collection_name.trim().is_empty() {
            return Err(ConfigError::validation(
                "collection_name",
                "Collection name cannot be empty.",
            ));
        }

        Ok(())
    }

    fn validate_sync(&self) -> Result<(), ConfigError> {
        if self.parallel_batch_size == 0 {
            return Err(ConfigError::validation(
                "parallel_batch_size",
                "Parallel batch size must be greater than 0.",
            ));
        }

        if self.parallel_sync_threshold == 0 {
            return Err(ConfigError::validation(
                "parallel_sync_threshold",
                "Parallel sync threshold must be greater than 0.",
            ));
        }

        Ok(())
    }

    fn validate_log_files(&self) -> Result<(), ConfigError> {
        if self.log_file.trim().is_empty() {
            return Err(ConfigError::validation(
                "log_file",
                "Log file path cannot be empty.",
            ));
        }

        if self.error_log_file.trim().is_empty() {
            return Err(ConfigError::validation(
                "error_log_file",
                "Error log file path cannot be empty.",
            ));
        }

        Ok(())
    }
}

fn has_node_scheme(url: &str) -> bool {
    VALID_NODE_SCHEMES
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(config: &Configuration, expected_field: &str) {
        let err = config.validate().expect_err("Configuration should be invalid");
        assert_eq!(err.field(), Some(expected_field), "unexpected error: {}", err);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Configuration::default().validate().is_ok());
    }

    #[test]
    fn test_single_custom_node_is_valid() {
        let config = Configuration {
            steemd_nodes: vec!["https://custom.node".to_string()],
            ..Configuration::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_node_list() {
        let config = Configuration {
            steemd_nodes: Vec::new(),
            ..Configuration::default()
        };
        assert_invalid(&config, "steemd_nodes");
    }

    #[test]
    fn test_invalid_node_reports_index() {
        let mut config = Configuration::default();
        config.steemd_nodes[2] = "not a url".to_string();
        assert_invalid(&config, "steemd_nodes[2]");
    }

    #[test]
    fn test_non_http_node() {
        let config = Configuration {
            steemd_nodes: vec!["ws://api.justyy.com".to_string()],
            ..Configuration::default()
        };
        assert_invalid(&config, "steemd_nodes[0]");
    }

    #[test]
    fn test_mongodb_url_scheme() {
        let config = Configuration {
            mongodb_url: "postgres://localhost/db".to_string(),
            ..Configuration::default()
        };
        assert_invalid(&config, "mongodb_url");

        let config = Configuration {
            mongodb_url: "mongodb+srv://cluster.example.net/".to_string(),
            ..Configuration::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_mongodb_url() {
        let config = Configuration {
            mongodb_url: "  ".to_string(),
            ..Configuration::default()
        };
        assert_invalid(&config, "mongodb_url");
    }

    #[test]
    fn test_blank_names() {
        let config = Configuration {
            db_name: String::new(),
            ..Configuration::default()
        };
        assert_invalid(&config, "db_name");

        let config = Configuration {
            collection_name: " ".to_string(),
            ..Configuration::default()
        };
        assert_invalid(&config, "collection_name");
    }

    #[test]
    fn test_zero_batch_size_and_threshold() {
        let config = Configuration {
            parallel_batch_size: 0,
            ..Configuration::default()
        };
        assert_invalid(&config, "parallel_batch_size");

        let config = Configuration {
            parallel_sync_threshold: 0,
            ..Configuration::default()
        };
        assert_invalid(&config, "parallel_sync_threshold");
    }

    #[test]
    fn test_blank_log_files() {
        let config = Configuration {
            log_file: String::new(),
            ..Configuration::default()
        };
        assert_invalid(&config, "log_file");

        let config = Configuration {
            error_log_file: String::new(),
            ..Configuration::default()
        };
        assert_invalid(&config, "error_log_file");
    }
}
