// src/config.rs

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::uploads::DEFAULT_MAX_UPLOAD_BYTES;

pub const DEFAULT_DATA_FILE: &str = "data/storage.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub bind_addr: SocketAddr,
    pub poll_interval: Duration,
    pub debounce: Duration,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Reads `PRIYA_*` variables; call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_file = lookup("PRIYA_DATA_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let bind_addr = parse_var(&lookup, "PRIYA_BIND_ADDR", "socket address")?
            .unwrap_or(Self::default().bind_addr);
        let poll_ms = parse_var(&lookup, "PRIYA_POLL_INTERVAL_MS", "number of milliseconds")?
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
        let debounce_ms = parse_var(&lookup, "PRIYA_DEBOUNCE_MS", "number of milliseconds")?
            .unwrap_or(DEFAULT_DEBOUNCE_MS);
        let max_upload_bytes = parse_var(&lookup, "PRIYA_MAX_UPLOAD_BYTES", "number of bytes")?
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Ok(Self {
            data_file,
            bind_addr,
            // A zero period would make `tokio::time::interval` panic.
            poll_interval: Duration::from_millis(poll_ms.max(1)),
            debounce: Duration::from_millis(debounce_ms),
            max_upload_bytes,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value,
            }),
    }
}
