//! Configuration record for the block synchronization tool
//!
//! [`Configuration`] is built once at startup and then only read. Defaults are
//! the values the sync tool ships with; a handful can be overridden through
//! environment variables (see [`crate::config::environment`]).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::environment::{self, EnvVars};

/// Steem API nodes used when `STEEMD_URL` is not set, in priority order
pub const DEFAULT_STEEMD_NODES: &[&str] = &[
    "https://api.justyy.com",
    "https://api.moecki.online",
    "https://api.pennsif.net",
    "https://api.botsteem.com",
    "https://api2.justyy.com",
    "https://api.steemitdev.com",
    "https://api.steememory.com",
];

pub const DEFAULT_MONGODB_URL: &str = "mongodb://host.docker.internal:27017/";
pub const DEFAULT_DB_NAME: &str = "SteemDB";
pub const DEFAULT_COLLECTION_NAME: &str = "SteemData";
pub const DEFAULT_PARALLEL_BATCH_SIZE: usize = 50;
pub const DEFAULT_PARALLEL_SYNC_THRESHOLD: usize = 100;
pub const DEFAULT_LOG_FILE: &str = "blocks_sync.log";
pub const DEFAULT_ERROR_LOG_FILE: &str = "blocks_error.log";

// ============================================================================
// Default value functions
// ============================================================================

fn default_steemd_nodes() -> Vec<String> {
    DEFAULT_STEEMD_NODES.iter().map(|s| s.to_string()).collect()
}

fn default_mongodb_url() -> String {
    DEFAULT_MONGODB_URL.to_string()
}

fn default_db_name() -> String {
    DEFAULT_DB_NAME.to_string()
}

fn default_collection_name() -> String {
    DEFAULT_COLLECTION_NAME.to_string()
}

fn default_parallel_batch_size() -> usize {
    DEFAULT_PARALLEL_BATCH_SIZE
}

fn default_parallel_sync_threshold() -> usize {
    DEFAULT_PARALLEL_SYNC_THRESHOLD
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

fn default_error_log_file() -> String {
    DEFAULT_ERROR_LOG_FILE.to_string()
}

// ============================================================================
// Configuration
// ============================================================================

/// Settings consumed by the block synchronization engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Steem API nodes. Load is spread across all of them during parallel sync.
    #[serde(default = "default_steemd_nodes")]
    pub steemd_nodes: Vec<String>,

    /// MongoDB connection URL
    #[serde(default = "default_mongodb_url")]
    pub mongodb_url: String,

    /// Database holding the synced blocks
    #[serde(default = "default_db_name")]
    pub db_name: String,

    /// Collection holding the synced blocks
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Blocks each worker fetches per batch during parallel sync
    #[serde(default = "default_parallel_batch_size")]
    pub parallel_batch_size: usize,

    /// Parallel sync kicks in when more than this many blocks are behind;
    /// otherwise blocks are fetched one at a time
    #[serde(default = "default_parallel_sync_threshold")]
    pub parallel_sync_threshold: usize,

    /// Path of the sync log
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Path of the error-only log
    #[serde(default = "default_error_log_file")]
    pub error_log_file: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            steemd_nodes: default_steemd_nodes(),
            mongodb_url: default_mongodb_url(),
            db_name: default_db_name(),
            collection_name: default_collection_name(),
            parallel_batch_size: default_parallel_batch_size(),
            parallel_sync_threshold: default_parallel_sync_threshold(),
            log_file: default_log_file(),
            error_log_file: default_error_log_file(),
        }
    }
}

impl Configuration {
    /// Apply environment overrides on top of `self`
    ///
    /// - `MONGODB_URL` and `DB_NAME` replace their field when non-empty.
    /// - `STEEMD_URL`, when non-empty, replaces the whole node list with a
    ///   single entry.
    pub fn with_overrides(mut self, env: &EnvVars) -> Self {
        if let Some(url) = env.get(environment::MONGODB_URL) {
            debug!(var = environment::MONGODB_URL, "Overriding mongodb_url");
            self.mongodb_url = url.to_string();
        }

        if let Some(name) = env.get(environment::DB_NAME) {
            debug!(var = environment::DB_NAME, value = name, "Overriding db_name");
            self.db_name = name.to_string();
        }

        if let Some(node) = env.get(environment::STEEMD_URL) {
            debug!(
                var = environment::STEEMD_URL,
                node, "Replacing node list with a single node"
            );
            self.steemd_nodes = vec![node.to_string()];
        }

        self
    }

    /// First node in the list, if any
    pub fn primary_node(&self) -> Option<&str> {
        self.steemd_nodes.first().map(String::as_str)
    }

    /// Whether a backlog of `blocks_behind` blocks should be synced in parallel
    pub fn use_parallel_sync(&self, blocks_behind: u64) -> bool {
        blocks_behind > self.parallel_sync_threshold as u64
    }
}
