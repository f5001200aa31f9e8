//! Detection subsystem.
//!
//! # Data Flow
//! ```text
//! /api/detect body:
//!     → types.rs (SubtitleEntry list)
//!     → detector.rs (keyword scan → AdRange list)
//!     → store.rs (overwrite result for the video id)
//!
//! /api/result/{id}:
//!     → store.rs (lookup) → response
//! ```

pub mod detector;
pub mod store;
pub mod types;

pub use detector::{Detection, Detector};
pub use store::ResultStore;
pub use types::{AdRange, DetectionResult, SubtitleEntry};
