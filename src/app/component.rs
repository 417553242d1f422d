//! Bootable components.
//!
//! A component is an optional capability registered on the application
//! before boot. During the boot phase each component contributes routes
//! and API-description entries through the [`BootContext`]; the start
//! phase then serves whatever was collected. Components never touch the
//! listener directly.

use async_trait::async_trait;
use axum::http::Method;
use axum::routing::MethodRouter;

use crate::http::server::AppContext;

/// Error type components may fail with during boot.
pub type ComponentError = Box<dyn std::error::Error + Send + Sync>;

/// An optional capability mounted into a service during boot.
#[async_trait]
pub trait Component: Send + Sync {
    /// Stable name, used for duplicate detection and logs.
    fn name(&self) -> &'static str;

    /// Contribute routes and API paths. Runs once per boot, in
    /// registration order; any error fails the boot phase.
    async fn boot(&self, ctx: &mut BootContext) -> Result<(), ComponentError>;
}

/// One operation in the service's API description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    pub method: Method,
    pub path: String,
    pub summary: String,
}

impl ApiPath {
    pub fn get(path: &str, summary: &str) -> Self {
        Self {
            method: Method::GET,
            path: path.to_string(),
            summary: summary.to_string(),
        }
    }
}

/// Mutable collection point handed to components during boot.
pub struct BootContext {
    service_name: String,
    paths: Vec<ApiPath>,
    mounts: Vec<(String, MethodRouter<AppContext>)>,
}

impl BootContext {
    pub(crate) fn new(service_name: String) -> Self {
        Self {
            service_name,
            paths: Vec::new(),
            mounts: Vec::new(),
        }
    }

    /// Name of the service being booted.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Add an operation to the API description.
    pub fn add_api_path(&mut self, path: ApiPath) {
        self.paths.push(path);
    }

    /// Mount a route. Path collisions are rejected when boot completes.
    pub fn mount(&mut self, path: impl Into<String>, route: MethodRouter<AppContext>) {
        self.mounts.push((path.into(), route));
    }

    pub(crate) fn into_parts(self) -> (Vec<ApiPath>, Vec<(String, MethodRouter<AppContext>)>) {
        (self.paths, self.mounts)
    }
}
