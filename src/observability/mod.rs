//! Observability subsystem.
//!
//! All runtime reporting goes through `tracing`; the startup URL lines
//! required of every service are `info` events emitted by the
//! bootstrapper. Only the binaries install a subscriber; embedders
//! keep whatever subscriber they already have.

pub mod logging;
