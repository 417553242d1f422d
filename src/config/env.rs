//! Environment snapshot and defaults-file layering.
//!
//! # Responsibilities
//! - Capture the process environment once, at the process boundary
//! - Layer an optional dotenv-format defaults file underneath it
//! - Hand the resolver an immutable key/value view
//!
//! # Design Decisions
//! - The snapshot is the only way configuration enters the library; no
//!   module reads `std::env` after process entry
//! - The defaults file never overrides a variable already present in the
//!   snapshot, and a missing file is not an error
//! - Loading goes through dotenvy's iterator so the process environment
//!   itself is never mutated (tests stay race-free)

use std::collections::BTreeMap;
use std::path::Path;

use super::resolve::ConfigError;

/// Conventional defaults-file name, looked up in the working directory
/// by the service binaries.
pub const DEFAULTS_FILE: &str = ".env.defaults";

/// An immutable snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from literal pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    fn insert_if_absent(&mut self, key: String, value: String) {
        self.vars.entry(key).or_insert(value);
    }
}

/// Layer a dotenv-format defaults file underneath a snapshot.
///
/// Variables already present in the snapshot win. A missing file returns
/// the snapshot unchanged; a malformed file is a configuration error.
pub fn load_defaults_file(path: &Path, env: Environment) -> Result<Environment, ConfigError> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(err) if err.not_found() => {
            tracing::debug!(path = %path.display(), "No defaults file, skipping");
            return Ok(env);
        }
        Err(source) => {
            return Err(ConfigError::DefaultsFile {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let mut env = env;
    for entry in entries {
        let (key, value) = entry.map_err(|source| ConfigError::DefaultsFile {
            path: path.display().to_string(),
            source,
        })?;
        env.insert_if_absent(key, value);
    }
    Ok(env)
}
