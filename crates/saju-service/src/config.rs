//! Scoring strategy configuration.
//!
//! Resolution order: explicit path, then `SAJU_CONFIG`, then
//! `~/.saju/config.toml` when it exists, then built-in defaults. The
//! `SAJU_STRATEGY` and `SAJU_REMOTE_URL` variables override whatever the
//! file said.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use std::{env, fs};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "SAJU_CONFIG";
pub const STRATEGY_ENV: &str = "SAJU_STRATEGY";
pub const REMOTE_URL_ENV: &str = "SAJU_REMOTE_URL";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Which scorer `build_scorer` constructs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Local,
    Remote,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Local => f.write_str("local"),
            Strategy::Remote => f.write_str("remote"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Strategy::Local),
            "remote" => Ok(Strategy::Remote),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Extra attempts after the first; 0 means a single attempt.
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            max_retries: 0,
            retry_base_delay_ms: 500,
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub strategy: Strategy,
    pub remote: RemoteConfig,
}

impl ServiceConfig {
    /// Resolve configuration from disk and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env_value(CONFIG_ENV).map(PathBuf::from));
        let mut config = Self::resolve_file(path.as_deref(), &default_config_path())?;
        config.apply_overrides(
            env_value(STRATEGY_ENV).as_deref(),
            env_value(REMOTE_URL_ENV).as_deref(),
        )?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicit path must exist; the per-user default is optional.
    fn resolve_file(path: Option<&Path>, fallback: &Path) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if fallback.is_file() => Self::from_file(fallback),
            None => Ok(Self::default()),
        }
    }

    pub fn apply_overrides(
        &mut self,
        strategy: Option<&str>,
        remote_url: Option<&str>,
    ) -> Result<(), ConfigError> {
        if let Some(strategy) = strategy {
            self.strategy = strategy.parse()?;
        }
        if let Some(url) = remote_url {
            self.remote.base_url = url.to_string();
        }
        Ok(())
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn default_config_path() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".saju")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.strategy, Strategy::Local);
        assert_eq!(config.remote.max_retries, 0);
        assert_eq!(config.remote.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"
strategy = "remote"

[remote]
base_url = "http://scoring.internal:9000"
max_retries = 2
"#,
        );
        let config = ServiceConfig::from_file(&path).unwrap();
        assert_eq!(config.strategy, Strategy::Remote);
        assert_eq!(config.remote.base_url, "http://scoring.internal:9000");
        assert_eq!(config.remote.max_retries, 2);
        assert_eq!(config.remote.timeout_secs, 10);
        assert_eq!(config.remote.retry_base_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_unknown_strategy_in_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "strategy = \"psychic\"\n");
        let err = ServiceConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ServiceConfig::resolve_file(Some(&missing), &missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_missing_default_path_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("config.toml");
        let config = ServiceConfig::resolve_file(None, &missing).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_default_path_used_when_present() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "strategy = \"remote\"\n");
        let config = ServiceConfig::resolve_file(None, &path).unwrap();
        assert_eq!(config.strategy, Strategy::Remote);
    }

    #[test]
    fn test_overrides() {
        let mut config = ServiceConfig::default();
        config
            .apply_overrides(Some("Remote"), Some("http://localhost:1234"))
            .unwrap();
        assert_eq!(config.strategy, Strategy::Remote);
        assert_eq!(config.remote.base_url, "http://localhost:1234");

        let err = config.apply_overrides(Some("cloud"), None).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStrategy(s) if s == "cloud"));
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for s in [Strategy::Local, Strategy::Remote] {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
    }
}
