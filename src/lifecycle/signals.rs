//! OS signal handling.
//!
//! # Responsibilities
//! - Register the interrupt handler (async-safe, via Tokio)
//! - Translate the signal into a graceful stop in the binaries
//!
//! # Design Decisions
//! - The library never installs handlers on its own; only the process
//!   entry points opt in

/// Wait for the interrupt signal (Ctrl-C).
pub async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
