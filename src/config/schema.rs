//! Configuration schema definitions.
//!
//! This module defines the runtime configuration shared by every
//! control-plane service, plus the per-service parameters and the
//! caller-supplied override shape. All types derive Serde traits so
//! embedders can deserialize overrides from JSON.

use serde::{Deserialize, Serialize};

/// Default bind address when neither an override nor `HOST` is present.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Static parameters distinguishing one service from another.
///
/// The subscription and tenant-management services share the entire
/// runtime; this is the whole of what differs between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    /// Service name, used in logs and the OpenAPI document title.
    pub name: &'static str,

    /// Port used when neither an override nor `PORT` is present.
    pub default_port: u16,
}

impl ServiceSpec {
    pub const fn new(name: &'static str, default_port: u16) -> Self {
        Self { name, default_port }
    }
}

/// Fully resolved runtime configuration for one service instance.
///
/// Resolved before the application is constructed and never mutated
/// afterwards.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// REST listener configuration (bind address, port).
    pub rest: RestConfig,

    /// Open-ended framework options, passed through unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// REST listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RestConfig {
    /// Network bind address (hostname or IP literal).
    pub host: String,

    /// TCP listen port. 0 requests an ephemeral port; the actual port is
    /// read back from the bound socket.
    pub port: u16,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: 0,
        }
    }
}

/// Caller-supplied partial configuration.
///
/// Any field present here wins over the environment and the hard-coded
/// defaults. The `rest` section merges shallowly: present fields replace
/// the resolved value, absent fields survive.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConfigOverrides {
    pub rest: RestOverrides,

    /// Extra framework options; same-named resolved entries are replaced.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Partial REST listener overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RestOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}
