//! Process-lifetime result storage.

use std::sync::Arc;

use dashmap::DashMap;

use crate::detection::types::DetectionResult;

/// A thread-safe map from video id to the last computed detection result.
///
/// Last write wins; results are never merged. State lives for the process
/// lifetime only, with no eviction.
#[derive(Clone, Default)]
pub struct ResultStore {
    inner: Arc<DashMap<String, DetectionResult>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Store a result, overwriting any previous result for the same id.
    pub fn put(&self, video_id: &str, result: DetectionResult) {
        self.inner.insert(video_id.to_string(), result);
    }

    /// Fetch the last stored result for an id.
    pub fn get(&self, video_id: &str) -> Option<DetectionResult> {
        self.inner.get(video_id).map(|entry| entry.value().clone())
    }

    /// Number of distinct ids with a stored result.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
