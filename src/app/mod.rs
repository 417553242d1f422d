//! Application instance subsystem.
//!
//! # Data Flow
//! ```text
//! Application::new(name, resolved config)        state: Unstarted
//!     → register(component)*                     (before boot only)
//!     → boot():  run component boot hooks,       Unstarted → Booting
//!                collect routes + API paths,
//!                reject route collisions          Booting → Booted
//!     → start(): bind listener, spawn serve task  Booted → Starting → Listening
//!     → url():   advertised base URL              valid only while Listening
//!     → stop():  drain serve task, release port   Listening → Booted
//! ```
//!
//! # Design Decisions
//! - Boot is idempotent: booting a booted instance is a no-op
//! - Any boot or start failure parks the instance in `Failed`; it is
//!   never reported as listening
//! - The actual port is read back from the bound socket, so port 0
//!   (ephemeral) works for tests and embedders

pub mod component;
pub mod explorer;

pub use component::{ApiPath, BootContext, Component, ComponentError};
pub use explorer::ApiExplorerComponent;

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::MethodRouter;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::ServiceConfig;
use crate::http::server::{advertised_url, build_router, AppContext, ServiceInfo};
use crate::http::PING_PATH;
use crate::lifecycle::{LifecycleState, Shutdown};

/// Error type for application lifecycle operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// An operation was invoked in a state that does not allow it.
    #[error("cannot {operation} while {state}")]
    Lifecycle {
        operation: &'static str,
        state: LifecycleState,
    },

    /// A registered component failed its boot hook.
    #[error("component {component} failed to boot: {source}")]
    ComponentBoot {
        component: &'static str,
        #[source]
        source: ComponentError,
    },

    /// Two resources claimed the same route path during boot.
    #[error("duplicate route {path} registered during boot")]
    DuplicateRoute { path: String },

    /// Binding the listener failed (port in use, permission denied,
    /// unresolvable host).
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The serve task ended with an error while stopping.
    #[error("server task failed: {0}")]
    Serve(#[source] std::io::Error),
}

/// A running (or not-yet-running) service instance.
///
/// Owns the resolved configuration, the component registry, and, once
/// listening, the bound socket and the serve task. One instance per
/// bootstrap call; nothing is shared between instances.
pub struct Application {
    name: String,
    config: ServiceConfig,
    state: LifecycleState,
    components: Vec<Box<dyn Component>>,
    catalog: Vec<ApiPath>,
    mounts: Vec<(String, MethodRouter<AppContext>)>,
    server: Option<RunningServer>,
}

struct RunningServer {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), std::io::Error>>,
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("catalog", &self.catalog)
            .field("server", &self.server.is_some())
            .finish()
    }
}

impl Application {
    /// Create an unstarted instance over a fully resolved configuration.
    pub fn new(name: impl Into<String>, config: ServiceConfig) -> Self {
        Self {
            name: name.into(),
            config,
            state: LifecycleState::Unstarted,
            components: Vec::new(),
            catalog: Vec::new(),
            mounts: Vec::new(),
            server: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Register a component. Registration is only possible before boot;
    /// a duplicate name or a late registration is skipped with a
    /// warning rather than failing the instance.
    pub fn register<C: Component + 'static>(&mut self, component: C) {
        if self.state != LifecycleState::Unstarted {
            tracing::warn!(
                component = component.name(),
                state = %self.state,
                "Component registered after boot, ignoring"
            );
            return;
        }
        if self.components.iter().any(|c| c.name() == component.name()) {
            tracing::warn!(
                component = component.name(),
                "Component already registered, ignoring"
            );
            return;
        }
        self.components.push(Box::new(component));
    }

    /// Boot phase: run every component's boot hook in registration
    /// order and validate the collected resources. Idempotent once
    /// booted. Must complete before [`start`](Self::start).
    pub async fn boot(&mut self) -> Result<(), AppError> {
        match self.state {
            LifecycleState::Booted => {
                tracing::debug!(service = %self.name, "Already booted");
                return Ok(());
            }
            LifecycleState::Unstarted => {}
            state => {
                return Err(AppError::Lifecycle {
                    operation: "boot",
                    state,
                })
            }
        }
        self.state = LifecycleState::Booting;

        let mut ctx = BootContext::new(self.name.clone());
        ctx.add_api_path(ApiPath::get(PING_PATH, "Liveness probe"));

        for component in &self.components {
            tracing::debug!(component = component.name(), "Booting component");
            if let Err(source) = component.boot(&mut ctx).await {
                self.state = LifecycleState::Failed;
                return Err(AppError::ComponentBoot {
                    component: component.name(),
                    source,
                });
            }
        }

        let (catalog, mounts) = ctx.into_parts();

        // The core surface owns /ping; no component may claim it, and no
        // two components may claim the same path.
        let mut seen: HashSet<&str> = HashSet::from([PING_PATH]);
        for (path, _) in &mounts {
            if !seen.insert(path) {
                let path = path.clone();
                self.state = LifecycleState::Failed;
                return Err(AppError::DuplicateRoute { path });
            }
        }

        self.catalog = catalog;
        self.mounts = mounts;
        self.state = LifecycleState::Booted;
        Ok(())
    }

    /// Start phase: bind the listener and serve the booted surface on a
    /// background task. Requires a completed boot.
    pub async fn start(&mut self) -> Result<(), AppError> {
        if self.state != LifecycleState::Booted {
            return Err(AppError::Lifecycle {
                operation: "start",
                state: self.state,
            });
        }
        self.state = LifecycleState::Starting;

        let context = AppContext {
            service: Arc::new(ServiceInfo {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION"),
            }),
            catalog: Arc::new(self.catalog.clone()),
            started_at: Instant::now(),
        };
        let router = build_router(context, self.mounts.clone());

        // An IP literal is formatted through SocketAddr so IPv6 gets its
        // brackets; anything else is a hostname for the resolver.
        let bind_addr = match self.config.rest.host.parse::<std::net::IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.config.rest.port).to_string(),
            Err(_) => format!("{}:{}", self.config.rest.host, self.config.rest.port),
        };
        let listener = match TcpListener::bind(&bind_addr).await {
            Ok(listener) => listener,
            Err(source) => {
                self.state = LifecycleState::Failed;
                return Err(AppError::Bind {
                    addr: bind_addr,
                    source,
                });
            }
        };
        let local_addr = match listener.local_addr() {
            Ok(addr) => addr,
            Err(source) => {
                self.state = LifecycleState::Failed;
                return Err(AppError::Bind {
                    addr: bind_addr,
                    source,
                });
            }
        };

        let shutdown = Shutdown::new();
        let watcher = shutdown.watcher();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(watcher.wait())
                .await
        });

        self.server = Some(RunningServer {
            local_addr,
            shutdown,
            task,
        });
        self.state = LifecycleState::Listening;
        tracing::debug!(service = %self.name, address = %local_addr, "Listener bound");
        Ok(())
    }

    /// The advertised base URL. `Some` only while listening.
    pub fn url(&self) -> Option<String> {
        if !self.state.is_listening() {
            return None;
        }
        self.server.as_ref().map(|s| advertised_url(s.local_addr))
    }

    /// The bound socket address. `Some` only while listening.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        if !self.state.is_listening() {
            return None;
        }
        self.server.as_ref().map(|s| s.local_addr)
    }

    /// Stop serving and release the listener. A no-op unless listening;
    /// the instance returns to `Booted` and may be started again.
    pub async fn stop(&mut self) -> Result<(), AppError> {
        if self.state != LifecycleState::Listening {
            tracing::debug!(service = %self.name, state = %self.state, "Nothing to stop");
            return Ok(());
        }
        if let Some(server) = self.server.take() {
            server.shutdown.trigger();
            match server.task.await {
                Ok(result) => result.map_err(AppError::Serve)?,
                Err(join_err) => return Err(AppError::Serve(std::io::Error::other(join_err))),
            }
        }
        self.state = LifecycleState::Booted;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve_config, ConfigOverrides, Environment, ServiceSpec};
    use async_trait::async_trait;
    use axum::routing::get;

    fn loopback_app() -> Application {
        let spec = ServiceSpec::new("test-service", 0);
        let mut overrides = ConfigOverrides::default();
        overrides.rest.host = Some("127.0.0.1".to_string());
        let config = resolve_config(&spec, &Environment::default(), &overrides).unwrap();
        Application::new("test-service", config)
    }

    struct PingSquatter;

    #[async_trait]
    impl Component for PingSquatter {
        fn name(&self) -> &'static str {
            "ping-squatter"
        }

        async fn boot(&self, ctx: &mut BootContext) -> Result<(), ComponentError> {
            ctx.mount(PING_PATH, get(|| async { "hijacked" }));
            Ok(())
        }
    }

    struct ExplodingComponent;

    #[async_trait]
    impl Component for ExplodingComponent {
        fn name(&self) -> &'static str {
            "exploding"
        }

        async fn boot(&self, _ctx: &mut BootContext) -> Result<(), ComponentError> {
            Err("resource unavailable".into())
        }
    }

    #[tokio::test]
    async fn test_start_before_boot_is_a_lifecycle_error() {
        let mut app = loopback_app();
        let err = app.start().await.unwrap_err();
        assert!(matches!(err, AppError::Lifecycle { operation: "start", .. }));
        assert_eq!(app.state(), LifecycleState::Unstarted);
    }

    #[tokio::test]
    async fn test_boot_is_idempotent() {
        let mut app = loopback_app();
        app.boot().await.unwrap();
        app.boot().await.unwrap();
        assert_eq!(app.state(), LifecycleState::Booted);
    }

    #[tokio::test]
    async fn test_component_failure_parks_the_instance_in_failed() {
        let mut app = loopback_app();
        app.register(ExplodingComponent);
        let err = app.boot().await.unwrap_err();
        assert!(matches!(err, AppError::ComponentBoot { component: "exploding", .. }));
        assert_eq!(app.state(), LifecycleState::Failed);
        // Failed is terminal.
        assert!(app.boot().await.is_err());
        assert!(app.start().await.is_err());
    }

    #[tokio::test]
    async fn test_route_collision_with_core_surface_fails_boot() {
        let mut app = loopback_app();
        app.register(PingSquatter);
        let err = app.boot().await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateRoute { ref path } if path == PING_PATH));
        assert_eq!(app.state(), LifecycleState::Failed);
    }

    #[tokio::test]
    async fn test_duplicate_component_registration_is_skipped() {
        let mut app = loopback_app();
        app.register(ApiExplorerComponent);
        app.register(ApiExplorerComponent);
        assert_eq!(app.components.len(), 1);
        // A second explorer would have collided on /openapi.json.
        app.boot().await.unwrap();
    }

    #[tokio::test]
    async fn test_url_is_only_valid_while_listening() {
        let mut app = loopback_app();
        assert_eq!(app.url(), None);
        app.boot().await.unwrap();
        assert_eq!(app.url(), None);
        app.start().await.unwrap();
        let url = app.url().expect("listening instance has a URL");
        assert!(url.starts_with("http://127.0.0.1:"));
        app.stop().await.unwrap();
        assert_eq!(app.url(), None);
        assert_eq!(app.state(), LifecycleState::Booted);
    }
}
