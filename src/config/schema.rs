//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the detection API.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request signature settings.
    pub security: SecurityConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Keyword detection settings.
    pub detection: DetectionConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request signature settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Reject detect requests without a valid signature.
    pub signature_required: bool,

    /// Shared key appended to the canonical payload before encoding.
    pub secret_key: String,

    /// Maximum allowed distance between the request timestamp and
    /// server time, in milliseconds.
    pub max_timestamp_skew_ms: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            signature_required: true,
            secret_key: "adskip_plugin_2024_secure_key".to_string(),
            max_timestamp_skew_ms: 300_000,
        }
    }
}

/// Rate limiting configuration.
///
/// All limits share one trailing window.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window length in seconds.
    pub window_secs: u64,

    /// Requests allowed per window across all callers of /api/detect.
    pub global_limit: usize,

    /// Detect requests allowed per window per client IP.
    pub per_ip_limit: usize,

    /// Detect requests allowed per window per user id.
    pub per_user_limit: usize,

    /// Result lookups allowed per window per client IP.
    pub result_per_ip_limit: usize,
}

impl RateLimitConfig {
    /// The shared trailing window as a [`std::time::Duration`].
    pub fn window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.window_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            global_limit: 60,
            per_ip_limit: 12,
            per_user_limit: 6,
            result_per_ip_limit: 20,
        }
    }
}

/// Keyword detection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Substrings that mark a subtitle entry as an ad.
    pub keywords: Vec<String>,

    /// Length of the emitted range after a matching entry's start, in seconds.
    pub ad_span_secs: f64,

    /// Constant confidence reported in responses.
    pub confidence: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            keywords: vec![
                "广告".to_string(),
                "赞助".to_string(),
                "支持".to_string(),
            ],
            ad_span_secs: 15.0,
            confidence: 0.95,
        }
    }
}

/// Cross-origin policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API. Wildcards are rejected
    /// by validation.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "chrome-extension://hnglljbeonpjacjdijbebkjlgeibhpfl".to_string(),
                "https://www.bilibili.com".to_string(),
                "https://bilibili.com".to_string(),
            ],
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Address for the metrics exporter.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
