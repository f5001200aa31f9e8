//! Keyword scanning over subtitle entries.

use crate::config::DetectionConfig;
use crate::detection::types::{AdRange, SubtitleEntry};

/// Outcome of one scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub has_ads: bool,
    pub ranges: Vec<AdRange>,
}

/// Scans subtitle entries for ad keywords and emits fixed-length ranges.
///
/// Pure and deterministic; O(entries × keywords). Ranges are emitted in
/// input order, one per matching entry, with no overlap merging.
pub struct Detector {
    keywords: Vec<String>,
    ad_span_secs: f64,
}

impl Detector {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            keywords: config.keywords.clone(),
            ad_span_secs: config.ad_span_secs,
        }
    }

    /// Scan an ordered subtitle list.
    ///
    /// An entry starting at `t` whose content contains any keyword yields
    /// the range `[t, t + ad_span_secs)`.
    pub fn scan(&self, subtitles: &[SubtitleEntry]) -> Detection {
        let mut ranges = Vec::new();

        for entry in subtitles {
            if self.keywords.iter().any(|k| entry.content.contains(k.as_str())) {
                ranges.push(AdRange {
                    start: entry.from,
                    end: entry.from + self.ad_span_secs,
                });
            }
        }

        Detection {
            has_ads: !ranges.is_empty(),
            ranges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> Detector {
        Detector::new(&DetectionConfig::default())
    }

    fn entry(content: &str, from: f64) -> SubtitleEntry {
        SubtitleEntry {
            content: content.to_string(),
            from,
        }
    }

    #[test]
    fn test_no_match_yields_empty() {
        let detection = detector().scan(&[
            entry("今天我们来看看这个技巧", 0.0),
            entry("接下来进入正题", 12.5),
        ]);
        assert!(!detection.has_ads);
        assert!(detection.ranges.is_empty());
    }

    #[test]
    fn test_match_emits_fixed_span_from_entry_start() {
        let detection = detector().scan(&[entry("本期视频由赞助商提供", 42.0)]);
        assert!(detection.has_ads);
        assert_eq!(detection.ranges, vec![AdRange { start: 42.0, end: 57.0 }]);
    }

    #[test]
    fn test_keyword_position_is_irrelevant() {
        let at_start = detector().scan(&[entry("广告时间到了", 10.0)]);
        let at_end = detector().scan(&[entry("接下来是一段广告", 10.0)]);
        assert_eq!(at_start.ranges, at_end.ranges);
        assert_eq!(at_start.ranges, vec![AdRange { start: 10.0, end: 25.0 }]);
    }

    #[test]
    fn test_adjacent_matches_are_not_merged() {
        let detection = detector().scan(&[
            entry("感谢广告商", 5.0),
            entry("继续赞助内容", 8.0),
        ]);
        assert_eq!(
            detection.ranges,
            vec![
                AdRange { start: 5.0, end: 20.0 },
                AdRange { start: 8.0, end: 23.0 },
            ]
        );
    }

    #[test]
    fn test_custom_keywords() {
        let config = DetectionConfig {
            keywords: vec!["sponsor".into()],
            ..DetectionConfig::default()
        };
        let detector = Detector::new(&config);
        let detection = detector.scan(&[entry("this video has a sponsor segment", 1.0)]);
        assert!(detection.has_ads);
        // Default keywords no longer apply.
        let none = detector.scan(&[entry("这是广告", 1.0)]);
        assert!(!none.has_ads);
    }

    #[test]
    fn test_empty_subtitle_list() {
        let detection = detector().scan(&[]);
        assert!(!detection.has_ads);
        assert!(detection.ranges.is_empty());
    }
}
