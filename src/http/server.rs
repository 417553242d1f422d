//! HTTP server setup.
//!
//! # Responsibilities
//! - Assemble the Axum router: core `/ping` plus component mounts
//! - Wire up middleware (request ID, tracing)
//! - Derive the advertised base URL from the bound socket address
//!
//! # Design Decisions
//! - Handlers read everything through a cloned [`AppContext`]; nothing
//!   reaches back into the application instance
//! - The router is rebuilt on every start, so a stopped and restarted
//!   instance serves the same surface

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    routing::{get, MethodRouter},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::app::component::ApiPath;
use crate::http::request::RequestIdLayer;
use crate::http::PING_PATH;

/// Immutable service metadata shared with every handler.
#[derive(Debug)]
pub struct ServiceInfo {
    pub name: String,
    pub version: &'static str,
}

/// State injected into handlers.
///
/// Frozen between boot and start; handlers never observe a half-built
/// API catalog.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub service: Arc<ServiceInfo>,
    pub catalog: Arc<Vec<ApiPath>>,
    pub started_at: Instant,
}

/// Build the router for one service instance.
pub fn build_router(context: AppContext, mounts: Vec<(String, MethodRouter<AppContext>)>) -> Router {
    let mut router = Router::new().route(PING_PATH, get(ping));
    for (path, route) in mounts {
        router = router.route(&path, route);
    }
    router
        .with_state(context)
        .layer(RequestIdLayer)
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct PingResponse {
    greeting: String,
    service: String,
    version: &'static str,
    uptime_seconds: u64,
}

/// Liveness probe.
async fn ping(State(context): State<AppContext>) -> Json<PingResponse> {
    Json(PingResponse {
        greeting: format!("Hello from {}", context.service.name),
        service: context.service.name.clone(),
        version: context.service.version,
        uptime_seconds: context.started_at.elapsed().as_secs(),
    })
}

/// Derive the base URL reported to callers from the bound address.
///
/// An unspecified bind address (`0.0.0.0`, `::`) is advertised in its
/// loopback form so the printed URL is directly usable. No trailing
/// slash: well-known paths are appended as literal suffixes.
pub fn advertised_url(addr: SocketAddr) -> String {
    let host = match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => "127.0.0.1".to_string(),
        IpAddr::V6(ip) if ip.is_unspecified() => "[::1]".to_string(),
        IpAddr::V4(ip) => ip.to_string(),
        IpAddr::V6(ip) => format!("[{}]", ip),
    };
    format!("http://{}:{}", host, addr.port())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_context() -> AppContext {
        AppContext {
            service: Arc::new(ServiceInfo {
                name: "subscription-service".to_string(),
                version: "0.0.0-test",
            }),
            catalog: Arc::new(Vec::new()),
            started_at: Instant::now(),
        }
    }

    #[test]
    fn test_advertised_url_maps_unspecified_to_loopback() {
        let v4: SocketAddr = "0.0.0.0:3002".parse().unwrap();
        assert_eq!(advertised_url(v4), "http://127.0.0.1:3002");

        let v6: SocketAddr = "[::]:3005".parse().unwrap();
        assert_eq!(advertised_url(v6), "http://[::1]:3005");
    }

    #[test]
    fn test_advertised_url_keeps_concrete_addresses() {
        let addr: SocketAddr = "192.168.1.7:8080".parse().unwrap();
        assert_eq!(advertised_url(addr), "http://192.168.1.7:8080");
    }

    #[tokio::test]
    async fn test_ping_responds_with_service_greeting() {
        let router = build_router(test_context(), Vec::new());
        let response = router
            .oneshot(Request::get(PING_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["greeting"], "Hello from subscription-service");
        assert_eq!(body["service"], "subscription-service");
    }
}
