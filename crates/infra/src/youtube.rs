use std::collections::HashMap;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use viewfinder_core::domain::search::{SearchRequest, SEARCH_QUOTA_COST, STATS_QUOTA_COST};
use viewfinder_core::domain::video::VideoResult;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const SEARCH_ORDER: &str = "viewCount";
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },
}

/// Thin client over the YouTube Data API v3: one `search.list` call for the
/// candidates, one `videos.list` call for their statistics.
pub struct YouTubeClient {
    http: Client,
    api_key: String,
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub items: Vec<VideoResult>,
    pub quota_used: u32,
}

impl YouTubeClient {
    pub fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    /// Run a normalized search request: fetch candidates, fill in view
    /// counts, rank by views descending, truncate to the requested size.
    pub async fn search(
        &self,
        request: &SearchRequest,
        now: DateTime<Utc>,
    ) -> Result<SearchOutcome, YouTubeError> {
        let published_after = request
            .date_range
            .published_after(now)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        let mut params: Vec<(&str, String)> = vec![
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("order", SEARCH_ORDER.to_string()),
            ("maxResults", request.max_results.to_string()),
            ("publishedAfter", published_after),
            ("key", self.api_key.clone()),
        ];
        if !request.query.is_empty() {
            params.push(("q", request.query.clone()));
        }
        if let Some(duration) = request.duration.as_query_param() {
            params.push(("videoDuration", duration.to_string()));
        }
        if let Some(topic_id) = request.topic.topic_id() {
            params.push(("topicId", topic_id.to_string()));
        }

        let response = self
            .http
            .get(format!("{API_BASE}/search"))
            .query(&params)
            .send()
            .await?;
        let listing: SearchListing = decode(response).await?;

        let mut items = Vec::new();
        for entry in listing.items {
            let Some(video_id) = entry.id.video_id else {
                continue;
            };
            let snippet = entry.snippet.unwrap_or_default();
            let url = format!("https://www.youtube.com/watch?v={video_id}");
            items.push(VideoResult {
                video_id,
                title: snippet.title,
                description: snippet.description,
                channel_title: snippet.channel_title,
                published_at: snippet.published_at,
                thumbnail: snippet.thumbnails.and_then(|set| set.medium).map(|t| t.url),
                view_count: 0,
                url,
            });
        }

        let mut quota_used = SEARCH_QUOTA_COST;
        if !items.is_empty() {
            let ids: Vec<&str> = items.iter().map(|item| item.video_id.as_str()).collect();
            let stats = self.fetch_statistics(&ids).await?;
            quota_used += STATS_QUOTA_COST;
            for item in &mut items {
                if let Some(count) = stats.get(&item.video_id) {
                    item.view_count = *count;
                }
            }
        }

        Ok(SearchOutcome {
            items: rank(items, request.max_results as usize),
            quota_used,
        })
    }

    async fn fetch_statistics(&self, video_ids: &[&str]) -> Result<HashMap<String, u64>, YouTubeError> {
        let params = [
            ("part", "statistics".to_string()),
            ("id", video_ids.join(",")),
            ("key", self.api_key.clone()),
        ];
        let response = self
            .http
            .get(format!("{API_BASE}/videos"))
            .query(&params)
            .send()
            .await?;
        let listing: VideoListing = decode(response).await?;
        let mut stats = HashMap::new();
        for entry in listing.items {
            stats.insert(entry.id, parse_view_count(entry.statistics));
        }
        Ok(stats)
    }
}

fn rank(mut items: Vec<VideoResult>, limit: usize) -> Vec<VideoResult> {
    items.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    items.truncate(limit);
    items
}

fn parse_view_count(statistics: Option<Statistics>) -> u64 {
    statistics
        .and_then(|stats| stats.view_count)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, YouTubeError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(YouTubeError::Api {
            status: status.as_u16(),
            message: extract_api_message(&body),
        });
    }
    Ok(response.json().await?)
}

fn extract_api_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct Envelope {
        error: Option<ErrorDetail>,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
    }
    if let Ok(envelope) = serde_json::from_str::<Envelope>(body) {
        if let Some(message) = envelope.error.and_then(|detail| detail.message) {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    let mut excerpt: String = trimmed.chars().take(ERROR_BODY_LIMIT).collect();
    if excerpt.len() < trimmed.len() {
        excerpt.push_str("...");
    }
    excerpt
}

#[derive(Debug, Deserialize)]
struct SearchListing {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: SearchItemId,
    snippet: Option<Snippet>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    thumbnails: Option<ThumbnailSet>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailSet {
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideoListing {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
struct Statistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}
