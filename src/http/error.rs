//! Handler error taxonomy.
//!
//! # Design Decisions
//! - Closed set of error kinds: malformed input, unauthorized,
//!   rate-limited, internal
//! - Failures are signaled in the body ({success:false, message}), not the
//!   HTTP status code; the wire contract keeps 200 for handled rejections
//! - Internal faults return a generic message; the detail is logged
//!   server-side, never sent to the caller

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use crate::http::response::FailureBody;

/// Everything a handler can reject a request with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request body")]
    MalformedInput,

    #[error("signature rejected")]
    Unauthorized,

    #[error("rate limit exceeded for {0}")]
    RateLimited(RateLimitScope),

    #[error("no stored result")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

/// Which window rejected the request; selects the caller-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitScope {
    Global,
    PerIp,
    PerUser,
}

impl RateLimitScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitScope::Global => "global",
            RateLimitScope::PerIp => "ip",
            RateLimitScope::PerUser => "user",
        }
    }
}

impl std::fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApiError {
    /// Caller-facing message. Generic on purpose; no detail leaks.
    fn message(&self) -> &'static str {
        match self {
            ApiError::MalformedInput => "invalid request body",
            ApiError::Unauthorized => "invalid request signature",
            ApiError::RateLimited(RateLimitScope::Global) => {
                "service busy, please try again later"
            }
            ApiError::RateLimited(RateLimitScope::PerIp) => {
                "too many requests, please try again later"
            }
            ApiError::RateLimited(RateLimitScope::PerUser) => {
                "user request rate exceeded, please try again later"
            }
            ApiError::NotFound => "no detection result for this video",
            ApiError::Internal(_) => "internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(detail = %detail, "Internal error while handling request");
        }
        (StatusCode::OK, Json(FailureBody::new(self.message()))).into_response()
    }
}
