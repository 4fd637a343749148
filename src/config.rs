use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::services::CapacityPolicy;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var} value '{value}'")]
    Invalid { var: &'static str, value: String },
    #[error("cannot parse listen address {0}")]
    Addr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON seed replacing the built-in activities.
    pub seed_path: Option<PathBuf>,
    pub capacity: CapacityPolicy,
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed_path: None,
            capacity: CapacityPolicy::default(),
            static_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(v) => v.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };
        let enforce = match get("ENFORCE_CAPACITY") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                var: "ENFORCE_CAPACITY",
                value: v,
            })?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            seed_path: get("ACTIVITIES_SEED_PATH").map(PathBuf::from),
            capacity: CapacityPolicy { enforce },
            static_dir: get("STATIC_DIR").map(PathBuf::from),
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        addr(&self.host, self.port)
    }

    /// Next port up, tried when the configured one is taken.
    pub fn fallback_addr(&self) -> Result<SocketAddr, ConfigError> {
        addr(&self.host, self.port.wrapping_add(1))
    }
}

fn addr(host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    let raw = format!("{}:{}", host, port);
    raw.parse().map_err(|_| ConfigError::Addr(raw))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
