//! Request handlers for the detection API.
//!
//! The detect pipeline runs signature validation, then the three rate-limit
//! windows in order (global, per-IP, per-user; first failure wins), then the
//! keyword scan, and finally overwrites the stored result for the video id.

use std::net::SocketAddr;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, Path, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::detection::types::SubtitleEntry;
use crate::detection::DetectionResult;
use crate::http::error::{ApiError, RateLimitScope};
use crate::http::response::{DetectResponse, LivenessBody, StoredResultResponse};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::rate_limit::{ip_key, user_key};
use crate::security::signature::now_millis;

/// Body of `POST /api/detect`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectRequest {
    pub video_id: String,

    #[serde(default)]
    pub subtitles: Vec<SubtitleEntry>,

    pub user: Option<UserDescriptor>,
    pub client_version: Option<String>,

    #[serde(default)]
    pub auto_detect: bool,

    /// Client wall clock, milliseconds since the Unix epoch.
    pub timestamp: Option<i64>,
    pub signature: Option<String>,
}

/// Optional caller identity attached to a detect request.
#[derive(Debug, Deserialize)]
pub struct UserDescriptor {
    /// Clients send uids as either numbers or strings.
    pub uid: Option<Value>,
    pub username: Option<String>,
}

impl DetectRequest {
    /// Uid normalized to a string for rate-limit scoping and logging.
    fn uid(&self) -> Option<String> {
        let uid = self.user.as_ref()?.uid.as_ref()?;
        match uid {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// `POST /api/detect`
pub async fn detect(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Result<Json<DetectResponse>, ApiError> {
    let start = Instant::now();

    let request: DetectRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Unparseable detect body");
        metrics::record_detect("malformed", start);
        ApiError::MalformedInput
    })?;

    let security = &state.config.security;
    if security.signature_required {
        if let Err(e) = state.validator.verify(
            &request.video_id,
            request.client_version.as_deref(),
            request.timestamp,
            request.signature.as_deref(),
            now_millis(),
        ) {
            tracing::warn!(
                video_id = %request.video_id,
                reason = %e,
                "Signature validation failed"
            );
            metrics::record_detect("unauthorized", start);
            return Err(ApiError::Unauthorized);
        }
    }

    let limits = &state.config.rate_limit;
    let window = limits.window();
    let uid = request.uid();

    let checks = [
        ("global".to_string(), limits.global_limit, RateLimitScope::Global),
        (ip_key(&addr.ip()), limits.per_ip_limit, RateLimitScope::PerIp),
        (user_key(uid.as_deref()), limits.per_user_limit, RateLimitScope::PerUser),
    ];
    for (key, limit, scope) in checks {
        let allowed = state.limiter.allow(&key, limit, window).map_err(|e| {
            metrics::record_detect("internal", start);
            ApiError::Internal(e.to_string())
        })?;
        if !allowed {
            tracing::warn!(scope = %scope, key = %key, "Rate limit exceeded");
            metrics::record_rate_limited(scope.as_str());
            metrics::record_detect("rate_limited", start);
            return Err(ApiError::RateLimited(scope));
        }
    }

    tracing::info!(
        video_id = %request.video_id,
        subtitle_count = request.subtitles.len(),
        client_version = request.client_version.as_deref().unwrap_or("unknown"),
        auto_detect = request.auto_detect,
        client_ip = %addr.ip(),
        uid = uid.as_deref().unwrap_or("anonymous"),
        username = request
            .user
            .as_ref()
            .and_then(|u| u.username.as_deref())
            .unwrap_or("unknown"),
        "Detect request accepted"
    );

    let detection = state.detector.scan(&request.subtitles);
    let result = DetectionResult::new(detection.has_ads, detection.ranges.clone());
    state.store.put(&request.video_id, result);
    metrics::record_store_size(state.store.len());
    metrics::record_detect("ok", start);

    let message = if detection.has_ads {
        "ad segments detected"
    } else {
        "no ad segments detected"
    };

    Ok(Json(DetectResponse {
        success: true,
        has_ads: detection.has_ads,
        ad_timestamps: detection.ranges,
        message: message.to_string(),
        confidence: state.config.detection.confidence,
    }))
}

/// `GET /api/result/{videoId}`
pub async fn get_result(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(video_id): Path<String>,
) -> Result<Json<StoredResultResponse>, ApiError> {
    let limits = &state.config.rate_limit;
    let allowed = state
        .limiter
        .allow(&ip_key(&addr.ip()), limits.result_per_ip_limit, limits.window())
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !allowed {
        metrics::record_rate_limited(RateLimitScope::PerIp.as_str());
        return Err(ApiError::RateLimited(RateLimitScope::PerIp));
    }

    match state.store.get(&video_id) {
        Some(result) => {
            metrics::record_result_lookup(true);
            Ok(Json(StoredResultResponse {
                success: true,
                result,
            }))
        }
        None => {
            metrics::record_result_lookup(false);
            // Not-found is a handled outcome, same shape as other rejections.
            Err(ApiError::NotFound)
        }
    }
}

/// `GET /` liveness probe.
pub async fn index() -> Json<LivenessBody> {
    Json(LivenessBody {
        message: "ad detection API service running",
    })
}
