//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming detect request:
//!     → signature.rs (canonical encoding + staleness check)
//!     → rate_limit.rs (global, per-IP, per-user windows)
//!     → Pass to detection
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any check failure
//! - Rejection messages stay generic; detail goes to the server log
//! - No trust in client input

pub mod rate_limit;
pub mod signature;

pub use rate_limit::SlidingWindowLimiter;
pub use signature::{SignatureError, SignatureValidator};
