//! Environment variable snapshot consumed by the configuration provider
//!
//! The provider never reads ambient process state directly. Callers capture
//! the variables they care about into an [`EnvVars`] value and pass it in,
//! which keeps configuration construction a pure function.

use config::Map;

/// Overrides `mongodb_url`
pub const MONGODB_URL: &str = "MONGODB_URL";

/// Overrides `db_name`
pub const DB_NAME: &str = "DB_NAME";

/// Replaces the whole node list with a single node
pub const STEEMD_URL: &str = "STEEMD_URL";

/// Optional TOML file layered between the defaults and the environment
pub const CONFIG_FILE: &str = "STEEM_SYNC_CONFIG_FILE";

/// Every variable captured by [`EnvVars::from_process`]
pub const KNOWN_VARS: &[&str] = &[MONGODB_URL, DB_NAME, STEEMD_URL, CONFIG_FILE];

/// Immutable snapshot of environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    vars: Map<String, String>,
}

impl EnvVars {
    /// An empty snapshot; every lookup falls back to the default
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture the known variables from the real process environment
    ///
    /// Variables that are unset or not valid unicode are skipped.
    pub fn from_process() -> Self {
        let vars = KNOWN_VARS
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| (name.to_string(), value))
            })
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit key-value pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable
    ///
    /// Returns `None` when the variable is absent or set to the empty string,
    /// so both cases keep the default.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns `true` if the variable is present and non-empty
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvVars
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
