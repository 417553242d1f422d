//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for the service binaries
//! - Respect `RUST_LOG`, defaulting to `info`
//!
//! # Design Decisions
//! - Safe to call more than once: a second call is a no-op, so tests
//!   and embedders that already installed a subscriber are left alone

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Errors only when a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
