//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     CLI --config path → loader.rs (read + parse TOML)
//!                       → validation.rs (semantic checks, all errors)
//!                       → AppConfig accepted into AppState
//! ```
//!
//! # Design Decisions
//! - Every section has working defaults; an empty file is a valid config
//! - Validation rejects wildcard CORS origins and zero limits up front
//! - Config is immutable once loaded (no hot reload)

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AppConfig, CorsConfig, DetectionConfig, ListenerConfig, ObservabilityConfig,
    RateLimitConfig, SecurityConfig, TimeoutConfig,
};
