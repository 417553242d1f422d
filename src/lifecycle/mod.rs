//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! State (state.rs):
//!     Unstarted → Booting → Booted → Starting → Listening
//!     (Booting | Starting) → Failed on any unrecoverable error
//!
//! Shutdown (shutdown.rs):
//!     stop() or signal → broadcast → serve task drains → listener closed
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl-C) → trigger graceful stop in the binaries
//! ```
//!
//! # Design Decisions
//! - No transition skips a state; the listening URL is only valid in
//!   `Listening`
//! - Boot must fully complete before start begins; neither has a
//!   timeout or abort path
//! - `Failed` is terminal for the instance

pub mod shutdown;
pub mod signals;
pub mod state;

pub use shutdown::{Shutdown, ShutdownWatcher};
pub use state::LifecycleState;
