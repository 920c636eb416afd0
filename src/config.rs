//! Server configuration from the environment.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::error::{Error, Result};

pub const HOST_VAR: &str = "EGSA87_HOST";
pub const PORT_VAR: &str = "EGSA87_PORT";
pub const BODY_LIMIT_VAR: &str = "EGSA87_BODY_LIMIT_MB";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on uploaded CSV size
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            body_limit_bytes: 100 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration, falling back to defaults for unset variables
    pub fn load() -> Result<Self> {
        Self::load_with(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let body_limit_mb: usize = try_load(&lookup, BODY_LIMIT_VAR, defaults.body_limit_bytes / (1024 * 1024))?;
        let body_limit_bytes = body_limit_mb.checked_mul(1024 * 1024).ok_or_else(|| {
            warn!("{BODY_LIMIT_VAR} of {body_limit_mb} MB does not fit in memory");
            Error::Config {
                key: BODY_LIMIT_VAR.to_string(),
                message: format!("{} MB is too large", body_limit_mb),
            }
        })?;

        Ok(Self {
            host: try_load(&lookup, HOST_VAR, defaults.host)?,
            port: try_load(&lookup, PORT_VAR, defaults.port)?,
            body_limit_bytes,
        })
    }

    /// Socket address string for binding
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            Error::Config {
                key: key.to_string(),
                message: e.to_string(),
            }
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
