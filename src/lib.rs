//! Shared bootstrap runtime for the SaaS control-plane services.
//!
//! # Architecture Overview
//!
//! ```text
//!   process entry (src/bin/*)
//!       │  snapshot environment, layer .env.defaults underneath
//!       ▼
//!   config: resolve (override > env > default) → validate
//!       ▼
//!   app:    Application::new → register components
//!       ▼
//!   lifecycle: boot (mount + validate resources)
//!            → start (bind listener, serve)
//!       ▼
//!   http:   /ping  /openapi.json  /explorer
//! ```
//!
//! The two services (subscription, tenant management) differ only in
//! their [`ServiceSpec`]: name and default port. Everything else is this
//! shared runtime, driven through [`bootstrap::start_service`].

// Core subsystems
pub mod app;
pub mod bootstrap;
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use app::{ApiExplorerComponent, Application};
pub use bootstrap::{start_service, BootstrapError};
pub use config::{ConfigOverrides, Environment, ServiceConfig, ServiceSpec};
