//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → server.rs (router, middleware: trace, request ID, CORS, timeout)
//!     → handlers.rs (detect / result / liveness pipelines)
//!     → response.rs (wire types) or error.rs (closed rejection set)
//! ```
//!
//! # Design Decisions
//! - Handled rejections answer HTTP 200 with {success:false, message};
//!   the status code is not used for signaling
//! - Shared state is injected via AppState, never ambient

pub mod error;
pub mod handlers;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
