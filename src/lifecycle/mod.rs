//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → graceful shutdown of the server
//!
//! Shutdown (shutdown.rs):
//!     broadcast trigger → stop accepting → drain in-flight → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
