//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::matcher::{MatchPolicy, MatcherConfig};

/// Address to listen on.
pub const BIND_ADDR_VAR: &str = "BUS_BIND_ADDR";

/// Path of the JSON route catalog.
pub const CATALOG_PATH_VAR: &str = "BUS_CATALOG_PATH";

/// Seconds between catalog reloads; `0` disables reloading.
pub const RELOAD_SECS_VAR: &str = "BUS_RELOAD_SECS";

/// Default number of stop suggestions.
pub const SUGGESTION_LIMIT_VAR: &str = "BUS_SUGGESTION_LIMIT";

/// Fuzzy-match policy: `lenient` or `strict`.
pub const MATCH_POLICY_VAR: &str = "BUS_MATCH_POLICY";

/// Error returned when an environment variable holds an invalid value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {key}={value:?}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

/// Configuration for the bus directory server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_addr: SocketAddr,

    /// Path of the JSON route catalog.
    pub catalog_path: PathBuf,

    /// How often to reload the catalog, if at all.
    pub reload_interval: Option<Duration>,

    /// Stop matcher configuration.
    pub matcher: MatcherConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to read variables.
    ///
    /// Unset or blank variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_or(read(BIND_ADDR_VAR), BIND_ADDR_VAR, defaults.bind_addr)?;

        let catalog_path = read(CATALOG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.catalog_path);

        let reload_secs: u64 = parse_or(read(RELOAD_SECS_VAR), RELOAD_SECS_VAR, 300)?;
        let reload_interval = (reload_secs > 0).then(|| Duration::from_secs(reload_secs));

        let suggestion_limit = parse_or(
            read(SUGGESTION_LIMIT_VAR),
            SUGGESTION_LIMIT_VAR,
            defaults.matcher.suggestion_limit,
        )?;
        let policy = parse_or(read(MATCH_POLICY_VAR), MATCH_POLICY_VAR, MatchPolicy::Lenient)?;

        Ok(Self {
            bind_addr,
            catalog_path,
            reload_interval,
            matcher: MatcherConfig::new(policy, suggestion_limit),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            catalog_path: PathBuf::from("buses.json"),
            reload_interval: Some(Duration::from_secs(300)),
            matcher: MatcherConfig::default(),
        }
    }
}

/// Parse a variable's value, or fall back to the default when unset.
fn parse_or<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + std::fmt::Debug,
    T::Err: std::fmt::Display,
{
    let Some(value) = value else {
        info!("{key} not set, using default: {default:?}");
        return Ok(default);
    };

    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError {
        key,
        value,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.catalog_path, PathBuf::from("buses.json"));
        assert_eq!(config.reload_interval, Some(Duration::from_secs(300)));
        assert_eq!(config.matcher.policy, MatchPolicy::Lenient);
        assert_eq!(config.matcher.suggestion_limit, 3);
    }

    #[test]
    fn reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "0.0.0.0:8080"),
            (CATALOG_PATH_VAR, "/data/routes.json"),
            (RELOAD_SECS_VAR, "60"),
            (SUGGESTION_LIMIT_VAR, "5"),
            (MATCH_POLICY_VAR, "strict"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.catalog_path, PathBuf::from("/data/routes.json"));
        assert_eq!(config.reload_interval, Some(Duration::from_secs(60)));
        assert_eq!(config.matcher.suggestion_limit, 5);
        assert_eq!(config.matcher.policy, MatchPolicy::Strict);
    }

    #[test]
    fn zero_disables_reload() {
        let config = ServerConfig::from_lookup(lookup(&[(RELOAD_SECS_VAR, "0")])).unwrap();
        assert_eq!(config.reload_interval, None);
    }

    #[test]
    fn blank_counts_as_unset() {
        let config = ServerConfig::from_lookup(lookup(&[(CATALOG_PATH_VAR, "  ")])).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("buses.json"));
    }

    #[test]
    fn invalid_values_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[(RELOAD_SECS_VAR, "soon")])).unwrap_err();
        assert_eq!(err.key, RELOAD_SECS_VAR);
        assert!(err.to_string().starts_with("invalid BUS_RELOAD_SECS=\"soon\": "));

        let err = ServerConfig::from_lookup(lookup(&[(MATCH_POLICY_VAR, "fuzzy")])).unwrap_err();
        assert_eq!(err.key, MATCH_POLICY_VAR);

        assert!(ServerConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])).is_err());
    }
}
