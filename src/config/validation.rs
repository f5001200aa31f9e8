//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits > 0, window > 0)
//! - Reject wildcard CORS origins
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("security.secret_key must not be empty when signatures are required")]
    EmptySecretKey,

    #[error("rate_limit.{0} must be greater than zero")]
    ZeroRateLimit(&'static str),

    #[error("detection.keywords must not be empty")]
    EmptyKeywords,

    #[error("detection.ad_span_secs must be greater than zero")]
    NonPositiveAdSpan,

    #[error("detection.confidence must be in (0, 1]")]
    ConfidenceOutOfRange,

    #[error("cors.allowed_origins must list exact origins, not '{0}'")]
    WildcardOrigin(String),

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.security.signature_required && config.security.secret_key.is_empty() {
        errors.push(ValidationError::EmptySecretKey);
    }

    let rl = &config.rate_limit;
    for (value, field) in [
        (rl.window_secs as usize, "window_secs"),
        (rl.global_limit, "global_limit"),
        (rl.per_ip_limit, "per_ip_limit"),
        (rl.per_user_limit, "per_user_limit"),
        (rl.result_per_ip_limit, "result_per_ip_limit"),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroRateLimit(field));
        }
    }

    if config.detection.keywords.is_empty() {
        errors.push(ValidationError::EmptyKeywords);
    }
    if config.detection.ad_span_secs <= 0.0 {
        errors.push(ValidationError::NonPositiveAdSpan);
    }
    if config.detection.confidence <= 0.0 || config.detection.confidence > 1.0 {
        errors.push(ValidationError::ConfidenceOutOfRange);
    }

    for origin in &config.cors.allowed_origins {
        if origin.contains('*') {
            errors.push(ValidationError::WildcardOrigin(origin.clone()));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
