//! Configuration resolution.
//!
//! Merges the three configuration sources in increasing precedence:
//! hard-coded defaults, the [`Environment`] snapshot, caller overrides.
//! Each key resolves independently; the `rest` override section merges
//! shallowly so unspecified fields survive.

use thiserror::Error;

use super::env::Environment;
use super::schema::{ConfigOverrides, RestConfig, ServiceConfig, ServiceSpec, DEFAULT_HOST};

/// Environment variable naming the bind address.
pub const HOST_VAR: &str = "HOST";

/// Environment variable naming the listen port.
pub const PORT_VAR: &str = "PORT";

/// Error type for configuration resolution and defaults-file loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `PORT` was present but did not coerce to a valid port number.
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    /// The defaults file exists but could not be read or parsed.
    #[error("failed to load defaults file {path}: {source}")]
    DefaultsFile { path: String, source: dotenvy::Error },
}

/// Resolve the full runtime configuration for one service.
///
/// Precedence, per key independently: override > environment > default.
/// `PORT` is coerced to a port number and fails fast when malformed; an
/// empty `HOST` falls back to the default bind address.
pub fn resolve_config(
    spec: &ServiceSpec,
    env: &Environment,
    overrides: &ConfigOverrides,
) -> Result<ServiceConfig, ConfigError> {
    let host = match &overrides.rest.host {
        Some(host) => host.clone(),
        None => match env.get(HOST_VAR) {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => DEFAULT_HOST.to_string(),
        },
    };

    let port = match overrides.rest.port {
        Some(port) => port,
        None => match env.get(PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|source| {
                ConfigError::InvalidPort {
                    value: raw.to_string(),
                    source,
                }
            })?,
            None => spec.default_port,
        },
    };

    let mut extra = ServiceConfig::default().extra;
    for (key, value) in &overrides.extra {
        extra.insert(key.clone(), value.clone());
    }

    Ok(ServiceConfig {
        rest: RestConfig { host, port },
        extra,
    })
}
