//! Configuration parsed from environment variables.
//!
//! Every value has a default, so an empty environment yields a working
//! editor. Values that are present but unparseable are errors rather than
//! silently falling back. Zoom bounds are not configurable.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{DEFAULT_MOVE_STEP, DEFAULT_SEARCH_DEBOUNCE_MS, DEFAULT_ZOOM_STEP};

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.iconscout.com/v3";
pub const DEFAULT_CATALOG_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CATALOG_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: String, value: String },

    /// A step or timeout was zero or negative.
    #[error("{var} must be positive")]
    NotPositive { var: String },

    /// The variable named by `EASEL_CATALOG_API_KEY_ENV` is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },
}

/// Step sizes for keyboard movement and wheel zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    pub move_step: f64,
    pub zoom_step: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { move_step: DEFAULT_MOVE_STEP, zoom_step: DEFAULT_ZOOM_STEP }
    }
}

impl InteractionConfig {
    /// Build from the process environment.
    ///
    /// Optional:
    /// - `EASEL_MOVE_STEP`: default 2.0
    /// - `EASEL_ZOOM_STEP`: default 0.05
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a non-numeric or non-positive value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`InteractionConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            move_step: parse_positive_f64(&lookup, "EASEL_MOVE_STEP", DEFAULT_MOVE_STEP)?,
            zoom_step: parse_positive_f64(&lookup, "EASEL_ZOOM_STEP", DEFAULT_ZOOM_STEP)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Settings for the remote object catalog and the panel that queries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub debounce_ms: u64,
    pub timeouts: CatalogTimeouts,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            api_key: None,
            debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            timeouts: CatalogTimeouts {
                request_secs: DEFAULT_CATALOG_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CATALOG_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

impl CatalogConfig {
    /// Build from the process environment.
    ///
    /// Optional:
    /// - `EASEL_CATALOG_BASE_URL`: default `https://api.iconscout.com/v3`
    /// - `EASEL_CATALOG_API_KEY_ENV`: names the env var holding the API key
    /// - `EASEL_CATALOG_DEBOUNCE_MS`: default 1000
    /// - `EASEL_CATALOG_REQUEST_TIMEOUT_SECS`: default 30
    /// - `EASEL_CATALOG_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a number fails to parse or the named key variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("EASEL_CATALOG_BASE_URL")
            .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_key = match lookup("EASEL_CATALOG_API_KEY_ENV") {
            Some(key_var) => Some(lookup(&key_var).ok_or(ConfigError::MissingApiKey { var: key_var })?),
            None => None,
        };

        let debounce_ms = parse_u64(&lookup, "EASEL_CATALOG_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS)?;
        let timeouts = CatalogTimeouts {
            request_secs: parse_u64(&lookup, "EASEL_CATALOG_REQUEST_TIMEOUT_SECS", DEFAULT_CATALOG_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_u64(&lookup, "EASEL_CATALOG_CONNECT_TIMEOUT_SECS", DEFAULT_CATALOG_CONNECT_TIMEOUT_SECS)?,
        };
        if timeouts.request_secs == 0 {
            return Err(ConfigError::NotPositive { var: "EASEL_CATALOG_REQUEST_TIMEOUT_SECS".into() });
        }

        Ok(Self { base_url, api_key, debounce_ms, timeouts })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

fn parse_positive_f64(lookup: &impl Fn(&str) -> Option<String>, var: &str, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var: var.to_string(), value: raw.clone() })?;
    if !value.is_finite() {
        return Err(ConfigError::Invalid { var: var.to_string(), value: raw });
    }
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { var: var.to_string() });
    }
    Ok(value)
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, var: &str, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var: var.to_string(), value: raw.clone() })
}
