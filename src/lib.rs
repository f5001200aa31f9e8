//! Ad-segment detection API.
//!
//! An HTTP service that accepts video subtitle text, flags likely
//! advertisement segments by keyword matching, and returns timestamp
//! ranges. All state is process-lifetime; nothing persists across restarts.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                 DETECTION API                     │
//!                    │                                                   │
//!  POST /api/detect  │  ┌──────────┐   ┌────────────┐   ┌────────────┐  │
//!  ──────────────────┼─▶│   CORS   │──▶│ signature  │──▶│ rate limit │  │
//!                    │  │  gate    │   │ validator  │   │  windows   │  │
//!                    │  └──────────┘   └────────────┘   └─────┬──────┘  │
//!                    │                                        │         │
//!                    │                                        ▼         │
//!  response          │  ┌──────────┐   ┌────────────┐   ┌────────────┐  │
//!  ◀─────────────────┼──│ response │◀──│  result    │◀──│  keyword   │  │
//!                    │  │  types   │   │  store     │   │  detector  │  │
//!                    │  └──────────┘   └─────▲──────┘   └────────────┘  │
//!                    │                       │                          │
//!  GET /api/result   │                       │                          │
//!  ──────────────────┼───────────────────────┘                          │
//!                    │                                                   │
//!                    │  ┌────────────────────────────────────────────┐  │
//!                    │  │           Cross-Cutting Concerns            │  │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌───────────┐  │  │
//!                    │  │  │ config │ │observability│ │ lifecycle │  │  │
//!                    │  │  └────────┘ └─────────────┘ └───────────┘  │  │
//!                    │  └────────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod detection;
pub mod http;
pub mod security;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
