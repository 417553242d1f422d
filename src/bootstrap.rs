//! Service bootstrap.
//!
//! The one operation both control-plane services run through:
//! resolve configuration, construct the application, enable the API
//! explorer, boot, start, report the listening URL. The caller gets the
//! running instance back; nothing here ever terminates the process.

use thiserror::Error;

use crate::app::{ApiExplorerComponent, AppError, Application};
use crate::config::{
    resolve_config, validate_config, ConfigError, ConfigOverrides, Environment, ServiceSpec,
    ValidationErrors,
};
use crate::http::{EXPLORER_PATH, OPENAPI_PATH, PING_PATH};

/// Error type for a failed bootstrap.
///
/// Library callers receive this as the failed result; the binaries log
/// it and exit non-zero. No variant is recoverable at this layer.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("configuration validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    App(#[from] AppError),
}

/// Resolve configuration and run a service to the listening state.
///
/// `overrides` wins over the environment, which wins over the spec's
/// defaults; see [`resolve_config`]. On success the instance is
/// listening and its URL has been reported; on failure every partial
/// resource has been released and the error says which phase failed.
pub async fn start_service(
    spec: &ServiceSpec,
    env: &Environment,
    overrides: &ConfigOverrides,
) -> Result<Application, BootstrapError> {
    let config = resolve_config(spec, env, overrides)?;
    validate_config(&config)?;

    tracing::info!(
        service = spec.name,
        host = %config.rest.host,
        port = config.rest.port,
        "Configuration resolved"
    );

    let mut app = Application::new(spec.name, config);
    app.register(ApiExplorerComponent);

    app.boot().await?;
    app.start().await?;

    if let Some(url) = app.url() {
        tracing::info!("Server is running at {url}");
        tracing::info!("Try {url}{PING_PATH}");
        tracing::info!("OpenAPI spec at {url}{OPENAPI_PATH}");
        tracing::info!("API Explorer at {url}{EXPLORER_PATH}");
    }

    Ok(app)
}
