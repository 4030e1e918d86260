//! Configuration handling for the ingestion service.
//!
//! Everything is read from environment variables with development defaults,
//! so the binary starts with no setup at all. `Config::from_env` validates the
//! numeric limits; a zero or unparsable limit is a startup error rather than a
//! silently unbounded service.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Environment variable names. Public so tests and deployment tooling can
/// refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";
pub const ENV_EXTRACT_TIMEOUT_MS: &str = "EXTRACT_TIMEOUT_MS";
pub const ENV_MAX_CONCURRENT_EXTRACTIONS: &str = "MAX_CONCURRENT_EXTRACTIONS";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024; // 2MB
const DEFAULT_EXTRACT_TIMEOUT_MS: u64 = 10_000;
const FALLBACK_CONCURRENT_EXTRACTIONS: usize = 4;

/// One extraction per CPU unless told otherwise.
fn default_concurrent_extractions() -> usize {
    std::thread::available_parallelism()
        .map(|cpus| cpus.get())
        .unwrap_or(FALLBACK_CONCURRENT_EXTRACTIONS)
}

/// Log output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    max_body_bytes: usize,
    extract_timeout: Duration,
    max_concurrent_extractions: usize,
    log_format: LogFormat,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        max_body_bytes: usize,
        extract_timeout: Duration,
        max_concurrent_extractions: usize,
        log_format: LogFormat,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            max_body_bytes,
            extract_timeout,
            max_concurrent_extractions,
            log_format,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let max_body_bytes = match env::var(ENV_MAX_BODY_BYTES) {
            Ok(raw) => parse_positive(ENV_MAX_BODY_BYTES, &raw)?,
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };

        let extract_timeout_ms = match env::var(ENV_EXTRACT_TIMEOUT_MS) {
            Ok(raw) => parse_positive(ENV_EXTRACT_TIMEOUT_MS, &raw)?,
            Err(_) => DEFAULT_EXTRACT_TIMEOUT_MS,
        };

        let max_concurrent_extractions = match env::var(ENV_MAX_CONCURRENT_EXTRACTIONS) {
            Ok(raw) => parse_positive(ENV_MAX_CONCURRENT_EXTRACTIONS, &raw)?,
            Err(_) => default_concurrent_extractions(),
        };

        let log_format = match env::var(ENV_LOG_FORMAT) {
            Ok(raw) => parse_log_format(&raw)?,
            Err(_) => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            max_body_bytes,
            extract_timeout: Duration::from_millis(extract_timeout_ms),
            max_concurrent_extractions,
            log_format,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Largest request body accepted on the webhook, in bytes.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
    /// Time budget for a single extraction.
    pub fn extract_timeout(&self) -> Duration {
        self.extract_timeout
    }
    /// Extractions allowed to run at once; requests beyond it are turned away.
    pub fn max_concurrent_extractions(&self) -> usize {
        self.max_concurrent_extractions
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        Self::new(
            DEFAULT_BIND_ADDR,
            DEFAULT_MAX_BODY_BYTES,
            Duration::from_millis(DEFAULT_EXTRACT_TIMEOUT_MS),
            default_concurrent_extractions(),
            LogFormat::Text,
        )
    }
}

fn parse_positive<T>(field: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let value: T = raw
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        })?;
    if value == T::default() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

fn parse_log_format(raw: &str) -> Result<LogFormat, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "text" | "" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(ConfigError::InvalidValue {
            field: ENV_LOG_FORMAT,
            reason: format!("unknown format '{}'", other),
        }),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
