use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One search hit, immutable once fetched. Statistics arrive in a second
/// provider call, so `view_count` starts at zero until it is filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResult {
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub view_count: u64,
    pub url: String,
}
