use serde::{Deserialize, Serialize};

use crate::domain::video::VideoResult;
use crate::error::CoreError;
use crate::types::date_range::DateRange;
use crate::types::duration::DurationFilter;
use crate::types::topic::Topic;

/// Point-in-time capture of one search: the request parameters and the
/// ranked results. Extra wire fields (the client-side `format` and `token`)
/// are dropped on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub duration: DurationFilter,
    #[serde(default)]
    pub topic: Topic,
    #[serde(default)]
    pub items: Vec<VideoResult>,
}

impl Snapshot {
    /// A snapshot is worth persisting or sharing only when it identifies a
    /// search (query, or a topic that stands in for one) and captured at
    /// least one result.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.query.trim().is_empty() && !self.topic.allows_empty_query() {
            return Err(CoreError::QueryRequired);
        }
        if self.items.is_empty() {
            return Err(CoreError::EmptySnapshot);
        }
        Ok(())
    }
}
