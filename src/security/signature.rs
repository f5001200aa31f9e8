//! Request signature validation.
//!
//! # Responsibilities
//! - Canonicalize the signed field subset deterministically
//! - Recompute the keyed encoding and compare with the declared signature
//! - Reject stale timestamps before any signature comparison
//!
//! # Design Decisions
//! - One canonical scheme: sorted-key JSON over {clientVersion, timestamp,
//!   videoId} with no whitespace, then base64(payload + secret)
//! - Pure check, no side effects; callers decide whether it is required
//! - Rejections carry a kind for logging but the wire message stays generic

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;
use thiserror::Error;

/// Why a signature check failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature or timestamp missing")]
    Missing,

    #[error("signed field set incomplete")]
    IncompleteFields,

    #[error("timestamp outside the allowed window")]
    Stale,

    #[error("signature mismatch")]
    Mismatch,
}

/// Field subset covered by the signature, serialized in sorted key order.
///
/// serde_json emits struct fields in declaration order with no whitespace,
/// which matches the client's sorted-key JSON exactly.
#[derive(Serialize)]
struct CanonicalPayload<'a> {
    #[serde(rename = "clientVersion")]
    client_version: &'a str,
    timestamp: i64,
    #[serde(rename = "videoId")]
    video_id: &'a str,
}

/// Validates the keyed encoding clients attach to detect requests.
pub struct SignatureValidator {
    secret_key: String,
    max_skew_ms: i64,
}

impl SignatureValidator {
    pub fn new(secret_key: impl Into<String>, max_skew_ms: u64) -> Self {
        Self {
            secret_key: secret_key.into(),
            max_skew_ms: max_skew_ms as i64,
        }
    }

    /// Verify a request's declared signature against server time `now_ms`
    /// (milliseconds since the Unix epoch).
    pub fn verify(
        &self,
        video_id: &str,
        client_version: Option<&str>,
        timestamp: Option<i64>,
        signature: Option<&str>,
        now_ms: i64,
    ) -> Result<(), SignatureError> {
        let timestamp = timestamp.ok_or(SignatureError::Missing)?;
        let signature = signature.ok_or(SignatureError::Missing)?;
        let client_version = client_version.ok_or(SignatureError::IncompleteFields)?;

        // Staleness wins over a matching encoding.
        if (now_ms - timestamp).abs() > self.max_skew_ms {
            return Err(SignatureError::Stale);
        }

        let expected = self.encode(video_id, client_version, timestamp);
        if expected != signature {
            return Err(SignatureError::Mismatch);
        }

        Ok(())
    }

    /// Compute the canonical encoding for the signed field subset.
    pub fn encode(&self, video_id: &str, client_version: &str, timestamp: i64) -> String {
        let payload = CanonicalPayload {
            client_version,
            timestamp,
            video_id,
        };
        // Serialization of a struct with only string/integer fields cannot fail.
        let canonical = serde_json::to_string(&payload).unwrap_or_default();
        BASE64.encode(format!("{}{}", canonical, self.secret_key))
    }
}

/// Current server time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
