//! Shared utilities for integration testing.

use saas_control_plane::config::{ConfigOverrides, Environment, ServiceSpec};
use saas_control_plane::{start_service, Application};

/// Bootstrap a service on the loopback interface with an ephemeral
/// port, isolated from the real process environment.
pub async fn start_on_loopback(spec: &ServiceSpec) -> Application {
    let mut overrides = ConfigOverrides::default();
    overrides.rest.host = Some("127.0.0.1".to_string());
    overrides.rest.port = Some(0);

    start_service(spec, &Environment::default(), &overrides)
        .await
        .expect("bootstrap should succeed on an ephemeral port")
}

/// HTTP client that ignores any proxy configured in the environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client construction")
}
