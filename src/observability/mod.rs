//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured key-value fields)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout log (EnvFilter-controlled)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod metrics;
