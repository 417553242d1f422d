//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (resolution handles syntactic coercion)
//! - Validate the bind address before the listener sees it
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServiceConfig → Result
//! - Runs after resolution, before the application is constructed

use std::fmt;
use std::net::IpAddr;

use super::schema::ServiceConfig;

/// A single semantic violation in a resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `rest.host`.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All violations found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a resolved configuration.
///
/// The host must be an IP literal or a plausible hostname. Port 0 is
/// accepted and means an ephemeral bind.
pub fn validate_config(config: &ServiceConfig) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    let host = config.rest.host.as_str();
    if host.is_empty() {
        errors.push(ValidationError {
            field: "rest.host",
            message: "bind address must not be empty".to_string(),
        });
    } else if host.parse::<IpAddr>().is_err() && !is_plausible_hostname(host) {
        errors.push(ValidationError {
            field: "rest.host",
            message: format!("{:?} is neither an IP literal nor a hostname", host),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn is_plausible_hostname(host: &str) -> bool {
    host.split('.').all(|label| {
        !label.is_empty()
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}
