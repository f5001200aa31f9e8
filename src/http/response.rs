//! Wire response types.
//!
//! Every endpoint answers with a JSON body carrying a `success` flag;
//! handled rejections reuse [`FailureBody`] under HTTP 200.

use serde::{Deserialize, Serialize};

use crate::detection::types::{AdRange, DetectionResult};

/// Body of a rejected or failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct FailureBody {
    pub success: bool,
    pub message: String,
}

impl FailureBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Successful answer of `POST /api/detect`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponse {
    pub success: bool,
    pub has_ads: bool,
    pub ad_timestamps: Vec<AdRange>,
    pub message: String,
    pub confidence: f64,
}

/// Successful answer of `GET /api/result/{videoId}`: the stored result
/// merged with a `success` flag.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredResultResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: DetectionResult,
}

/// Liveness body for `GET /`.
#[derive(Debug, Serialize)]
pub struct LivenessBody {
    pub message: &'static str,
}
