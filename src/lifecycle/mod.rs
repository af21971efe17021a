//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Session polling (session/poller.rs):
//!     Poller::start → Shutdown::signal per task
//!     Poller::stop / drop → Shutdown::trigger → tasks exit
//!
//! Signals (signals.rs):
//!     SIGINT → CLI tears the session down
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
