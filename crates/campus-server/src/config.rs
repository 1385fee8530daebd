//! Startup settings for the campus dining server.
//!
//! Read once from a TOML file; `CAMPUS_*` environment variables win over the
//! file, and anything left unset keeps its default.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Everything `main` needs before the first request is served.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Listening address.
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite file and pool tunables.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Tracing subscriber setup.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind; loopback unless opened up explicitly.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// TCP port for the JSON API.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// `[database]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file holding locations, restaurants and reviews. Created on
    /// first start.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// How long a write waits for a concurrent writer, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Connections available to in-flight requests.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
}

/// `[logging]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"campus_server=debug,tower_http=info"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// One JSON object per line instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8000
}

fn default_db_path() -> String {
    "campus.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_pool_max_size() -> u32 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// The file is not valid TOML or has a mistyped key.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads the server configuration.
///
/// `path` names a TOML file; a file that does not exist yields the defaults.
/// Environment variables are applied on top:
///
/// | Variable | Setting |
/// |---|---|
/// | `CAMPUS_HOST` | `server.host` |
/// | `CAMPUS_PORT` | `server.port` |
/// | `CAMPUS_DB_PATH` | `database.path` |
/// | `CAMPUS_DB_BUSY_TIMEOUT_MS` | `database.busy_timeout_ms` |
/// | `CAMPUS_DB_POOL_SIZE` | `database.pool_max_size` |
/// | `CAMPUS_LOG_LEVEL` | `logging.level` |
/// | `CAMPUS_LOG_JSON` | `logging.json` (`true` or `1`) |
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Overwrites settings from `lookup`. Values that fail to parse are logged
/// and ignored.
fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    fn parsed<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
        let raw = raw?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key, value = %raw, "ignoring unparsable config override");
                None
            }
        }
    }

    if let Some(host) = parsed("CAMPUS_HOST", lookup("CAMPUS_HOST")) {
        config.server.host = host;
    }
    if let Some(port) = parsed("CAMPUS_PORT", lookup("CAMPUS_PORT")) {
        config.server.port = port;
    }
    if let Some(db_path) = lookup("CAMPUS_DB_PATH") {
        config.database.path = db_path;
    }
    if let Some(ms) = parsed("CAMPUS_DB_BUSY_TIMEOUT_MS", lookup("CAMPUS_DB_BUSY_TIMEOUT_MS")) {
        config.database.busy_timeout_ms = ms;
    }
    if let Some(size) = parsed("CAMPUS_DB_POOL_SIZE", lookup("CAMPUS_DB_POOL_SIZE")) {
        config.database.pool_max_size = size;
    }
    if let Some(level) = lookup("CAMPUS_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("CAMPUS_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Some("/nonexistent/campus-config.toml"))
            .expect("missing file should not be an error");
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.database.pool_max_size, 8);
    }

    #[test]
    fn partial_file_keeps_defaults_for_unset_keys() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        writeln!(
            file,
            "[database]\npool_max_size = 2\n\n[logging]\nlevel = \"debug\""
        )
        .expect("should write config");

        let config = load_config(file.path().to_str()).expect("config should parse");
        assert_eq!(config.database.pool_max_size, 2);
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        if std::env::var("CAMPUS_LOG_LEVEL").is_err() {
            assert_eq!(config.logging.level, "debug");
        }
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        writeln!(file, "[server]\nport = \"not a number\"").expect("should write config");

        let err = load_config(file.path().to_str()).expect_err("bad port should fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| match key {
            "CAMPUS_PORT" => Some("9100".to_string()),
            "CAMPUS_DB_POOL_SIZE" => Some("16".to_string()),
            "CAMPUS_DB_BUSY_TIMEOUT_MS" => Some("not-a-number".to_string()),
            "CAMPUS_LOG_JSON" => Some("1".to_string()),
            _ => None,
        });

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.pool_max_size, 16);
        assert_eq!(config.database.busy_timeout_ms, 5_000, "bad value is ignored");
        assert!(config.logging.json);
        assert_eq!(config.database.path, "campus.db");
    }
}
