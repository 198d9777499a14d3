use serde::Deserialize;

use crate::error::CoreError;
use crate::types::date_range::DateRange;
use crate::types::duration::DurationFilter;
use crate::types::topic::Topic;

/// Quota units charged by the provider per call type. Informational only;
/// the provider keeps the authoritative count.
pub const SEARCH_QUOTA_COST: u32 = 100;
pub const STATS_QUOTA_COST: u32 = 1;

pub const DEFAULT_MAX_RESULTS: u32 = 12;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub duration: DurationFilter,
    #[serde(default)]
    pub topic: Topic,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

impl SearchRequest {
    /// Trim the query, clamp `max_results` into `1..=cap`, and enforce the
    /// query-or-topic invariant. All other fields already fell back to their
    /// defaults during deserialization.
    pub fn normalize(mut self, cap: u32) -> Result<Self, CoreError> {
        self.query = self.query.trim().to_string();
        if self.query.is_empty() && !self.topic.allows_empty_query() {
            return Err(CoreError::QueryRequired);
        }
        self.max_results = self.max_results.clamp(1, cap.max(1));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: &str, topic: Topic, max_results: u32) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            date_range: DateRange::default(),
            duration: DurationFilter::default(),
            topic,
            max_results,
        }
    }

    #[test]
    fn empty_query_with_no_topic_is_rejected() {
        let err = request("", Topic::None, 10).normalize(25).unwrap_err();
        assert!(matches!(err, CoreError::QueryRequired));
    }

    #[test]
    fn whitespace_query_counts_as_empty() {
        assert!(request("   ", Topic::None, 10).normalize(25).is_err());
    }

    #[test]
    fn gaming_topic_allows_empty_query() {
        let normalized = request("", Topic::Gaming, 10).normalize(25).unwrap();
        assert_eq!(normalized.query, "");
    }

    #[test]
    fn max_results_is_clamped_to_cap() {
        let normalized = request("lofi", Topic::None, 400).normalize(25).unwrap();
        assert_eq!(normalized.max_results, 25);
        let floored = request("lofi", Topic::None, 0).normalize(25).unwrap();
        assert_eq!(floored.max_results, 1);
    }

    #[test]
    fn sparse_body_gets_defaults() {
        let request: SearchRequest = serde_json::from_str(r#"{"query": "lofi"}"#).unwrap();
        assert_eq!(request.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(request.date_range, DateRange::Week);
        assert_eq!(request.topic, Topic::None);
    }
}
