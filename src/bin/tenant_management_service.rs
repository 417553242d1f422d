//! Process entry point for the tenant management service.
//!
//! Identical to the subscription service apart from its
//! [`ServiceSpec`]; the shared runtime does everything else.

use std::path::Path;
use std::process;

use saas_control_plane::config::{
    load_defaults_file, ConfigOverrides, Environment, ServiceSpec, DEFAULTS_FILE,
};
use saas_control_plane::{bootstrap, lifecycle, observability};

const SERVICE: ServiceSpec = ServiceSpec::new("tenant-management-service", 3005);

#[tokio::main]
async fn main() {
    observability::logging::init();

    let env = Environment::from_process();
    let env = match load_defaults_file(Path::new(DEFAULTS_FILE), env) {
        Ok(env) => env,
        Err(err) => {
            tracing::error!(error = %err, "Cannot start the application");
            process::exit(1);
        }
    };

    let mut app = match bootstrap::start_service(&SERVICE, &env, &ConfigOverrides::default()).await
    {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(error = %err, "Cannot start the application");
            process::exit(1);
        }
    };

    lifecycle::signals::shutdown_signal().await;
    if let Err(err) = app.stop().await {
        tracing::error!(error = %err, "Shutdown failed");
        process::exit(1);
    }
}
