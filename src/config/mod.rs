//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment ──┐
//! .env.defaults file ───┤  env.rs (snapshot; existing vars win)
//!                       ▼
//!              Environment (immutable)
//!                       │
//! caller overrides ─────┤  resolve.rs (override > env > default)
//!                       ▼
//!              ServiceConfig
//!                       │
//!                       ▼  validation.rs (semantic checks)
//!              validated, immutable, handed to Application
//! ```
//!
//! # Design Decisions
//! - The environment is read exactly once, at the process boundary, into
//!   an [`Environment`] snapshot; the resolver never touches process
//!   globals and is therefore a pure function of its inputs
//! - Config is immutable once resolved; the application never writes it
//! - Validation separates syntactic (parsing) from semantic checks and
//!   reports every violation, not just the first

pub mod env;
pub mod resolve;
pub mod schema;
pub mod validation;

pub use env::{load_defaults_file, Environment, DEFAULTS_FILE};
pub use resolve::{resolve_config, ConfigError};
pub use schema::{ConfigOverrides, RestConfig, RestOverrides, ServiceConfig, ServiceSpec};
pub use validation::{validate_config, ValidationError, ValidationErrors};
