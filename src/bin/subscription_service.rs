//! Process entry point for the subscription service.
//!
//! All logic lives in the shared runtime; this binary only installs
//! logging, layers the optional defaults file under the environment,
//! and turns a failed bootstrap into exit status 1.

use std::path::Path;
use std::process;

use saas_control_plane::config::{
    load_defaults_file, ConfigOverrides, Environment, ServiceSpec, DEFAULTS_FILE,
};
use saas_control_plane::{bootstrap, lifecycle, observability};

const SERVICE: ServiceSpec = ServiceSpec::new("subscription-service", 3002);

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
