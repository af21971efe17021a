//! Observability subsystem.
//!
//! All subsystems emit `tracing` events with structured fields; `logging.rs`
//! installs the subscriber once at startup.

pub mod logging;
