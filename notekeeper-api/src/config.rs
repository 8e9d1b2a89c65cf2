//! Service Configuration
//!
//! Configuration is layered: built-in defaults, then an optional YAML file
//! named by `NOTEKEEPER_CONFIG_PATH`, then `NOTEKEEPER_*` environment
//! variables. Later layers win.
//!
//! Environment variables:
//! - `NOTEKEEPER_ENV`: local | dev | prod (default: local)
//! - `NOTEKEEPER_HTTP_ADDRESS`: bind address (default: 127.0.0.1:8080)
//! - `NOTEKEEPER_DB_HOST`, `NOTEKEEPER_DB_PORT`, `NOTEKEEPER_DB_USER`,
//!   `NOTEKEEPER_DB_PASSWORD`, `NOTEKEEPER_DB_NAME`, `NOTEKEEPER_DB_SSLMODE`,
//!   `NOTEKEEPER_DB_POOL_SIZE`
//! - `NOTEKEEPER_CORS_ORIGINS`: comma-separated allowed origins (empty = allow all)

use axum::http::HeaderValue;
use notekeeper_core::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::db::{DbConfig, SslMode};

/// Environment variable naming the YAML config file.
pub const CONFIG_PATH_VAR: &str = "NOTEKEEPER_CONFIG_PATH";

// ============================================================================
// ENVIRONMENT
// ============================================================================

/// Deployment environment. Drives log format and production checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            _ => Err("expected one of local, dev, prod".to_string()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        };
        f.write_str(s)
    }
}

// ============================================================================
// SECTIONS
// ============================================================================

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub address: SocketAddr,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

/// CORS settings for the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Allowed CORS origins, already checked as header values. Empty means
    /// allow all origins.
    pub cors_origins: Vec<HeaderValue>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            cors_max_age_secs: 86400,
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub env: Environment,
    pub http: HttpConfig,
    pub db: DbConfig,
    pub api: ApiConfig,
}

// ============================================================================
// YAML FILE LAYER
// ============================================================================

/// Shape of the optional YAML config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub env: Option<String>,
    pub http_server: FileHttp,
    pub db_postgres: FileDb,
    pub cors: FileCors,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileHttp {
    // Older config files spell this key `addres`.
    #[serde(alias = "addres")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileDb {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub dbname: Option<String>,
    pub sslmode: Option<String>,
    pub pool_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileCors {
    pub origins: Vec<String>,
}

impl FileConfig {
    /// Parse YAML text. `path` is only used in error messages.
    pub fn from_yaml(path: &str, text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|e| ConfigError::Unreadable {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

// ============================================================================
// LOADING
// ============================================================================

impl AppConfig {
    /// Load configuration from the process environment and, when
    /// `NOTEKEEPER_CONFIG_PATH` is set, the YAML file it names.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                let text =
                    std::fs::read_to_string(&path).map_err(|e| ConfigError::Unreadable {
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                FileConfig::from_yaml(&path, &text)?
            }
            Err(_) => FileConfig::default(),
        };
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Build a configuration from a parsed file and an environment lookup.
    pub fn from_sources<F>(file: FileConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = AppConfig::default();

        // === Environment ===
        if let Some((field, raw)) = pick(
            var("NOTEKEEPER_ENV"),
            "NOTEKEEPER_ENV",
            file.env,
            "env",
        ) {
            config.env = parse_field(field, &raw)?;
        }

        // === HTTP ===
        if let Some((field, raw)) = pick(
            var("NOTEKEEPER_HTTP_ADDRESS"),
            "NOTEKEEPER_HTTP_ADDRESS",
            file.http_server.address,
            "http_server.address",
        ) {
            config.http.address = parse_field(field, &raw)?;
        }

        // === Database ===
        let db = &mut config.db;
        let fdb = file.db_postgres;
        if let Some(host) = var("NOTEKEEPER_DB_HOST").or(fdb.host) {
            db.host = host;
        }
        if let Some(raw) = var("NOTEKEEPER_DB_PORT") {
            db.port = parse_field("NOTEKEEPER_DB_PORT", &raw)?;
        } else if let Some(port) = fdb.port {
            db.port = port;
        }
        if let Some(user) = var("NOTEKEEPER_DB_USER").or(fdb.user) {
            db.user = user;
        }
        if let Some(password) = lookup("NOTEKEEPER_DB_PASSWORD").or(fdb.password) {
            db.password = password;
        }
        if let Some(dbname) = var("NOTEKEEPER_DB_NAME").or(fdb.dbname) {
            db.dbname = dbname;
        }
        if let Some((field, raw)) = pick(
            var("NOTEKEEPER_DB_SSLMODE"),
            "NOTEKEEPER_DB_SSLMODE",
            fdb.sslmode,
            "db_postgres.sslmode",
        ) {
            db.sslmode = parse_field::<SslMode>(field, &raw)?;
        }
        if let Some(raw) = var("NOTEKEEPER_DB_POOL_SIZE") {
            db.max_size = parse_field("NOTEKEEPER_DB_POOL_SIZE", &raw)?;
        } else if let Some(size) = fdb.pool_size {
            db.max_size = size;
        }
        if db.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pool_size".to_string(),
                value: "0".to_string(),
                reason: "pool size must be at least 1".to_string(),
            });
        }

        // === CORS ===
        config.api.cors_origins = match var("NOTEKEEPER_CORS_ORIGINS") {
            Some(raw) => parse_origins("NOTEKEEPER_CORS_ORIGINS", raw.split(','))?,
            None => parse_origins("cors.origins", file.cors.origins.iter().map(String::as_str))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Production requires a database password.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.env == Environment::Prod && self.db.password.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "NOTEKEEPER_DB_PASSWORD".to_string(),
            });
        }
        Ok(())
    }
}

/// Environment value if present, else the file value, tagged with the
/// name to report on a parse failure.
fn pick(
    env_value: Option<String>,
    env_name: &'static str,
    file_value: Option<String>,
    file_name: &'static str,
) -> Option<(&'static str, String)> {
    env_value
        .map(|v| (env_name, v))
        .or_else(|| file_value.map(|v| (file_name, v)))
}

fn parse_field<T>(field: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Trim, drop empty entries, and reject origins that cannot be sent as a
/// header value.
fn parse_origins<'a>(
    field: &str,
    origins: impl Iterator<Item = &'a str>,
) -> Result<Vec<HeaderValue>, ConfigError> {
    origins
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| ConfigError::InvalidValue {
                field: field.to_string(),
                value: o.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
