//! Core detection data types.

use serde::{Deserialize, Serialize};

/// One subtitle line with its start offset in seconds.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SubtitleEntry {
    /// Free-text subtitle content.
    #[serde(default)]
    pub content: String,

    /// Start offset within the video, in seconds.
    #[serde(default)]
    pub from: f64,
}

/// A flagged time range, in seconds.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct AdRange {
    pub start: f64,
    pub end: f64,
}

/// Stored outcome of a keyword scan for one video.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub has_ads: bool,
    pub ad_timestamps: Vec<AdRange>,
    /// Wall-clock creation time, "YYYY-MM-DD HH:MM:SS" UTC.
    pub detected_at: String,
}

impl DetectionResult {
    pub fn new(has_ads: bool, ad_timestamps: Vec<AdRange>) -> Self {
        Self {
            has_ads,
            ad_timestamps,
            detected_at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
