use reqwest::Client;
use thiserror::Error;

use viewfinder_core::domain::snapshot::Snapshot;

const MAX_LISTED_RESULTS: usize = 5;
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("webhook returned status {status}: {body}")]
    Delivery { status: u16, body: String },
}

/// Posts a condensed snapshot summary to a Discord-compatible webhook.
pub struct WebhookNotifier {
    http: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }

    pub async fn send(&self, snapshot: &Snapshot) -> Result<(), WebhookError> {
        let payload = serde_json::json!({ "content": format_message(snapshot) });
        let response = self.http.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WebhookError::Delivery {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }
        Ok(())
    }
}

/// Markdown summary: a header with the search parameters, the top results
/// as links, and a trailer when the list was cut off.
pub fn format_message(snapshot: &Snapshot) -> String {
    let query = if snapshot.query.is_empty() {
        snapshot.topic.label()
    } else {
        &snapshot.query
    };
    let mut lines = vec![format!(
        "**YouTube Search Snapshot**\n• Query: `{}`\n• Range: {} | Duration: {} | Results: {}",
        query,
        snapshot.date_range.key(),
        snapshot.duration.key(),
        snapshot.items.len()
    )];

    for (idx, item) in snapshot.items.iter().take(MAX_LISTED_RESULTS).enumerate() {
        let title = if item.title.is_empty() {
            "Untitled video"
        } else {
            &item.title
        };
        let channel = if item.channel_title.is_empty() {
            "Unknown channel"
        } else {
            &item.channel_title
        };
        lines.push(format!(
            "{}. [{}]({}) — {} • {} views",
            idx + 1,
            title,
            item.url,
            channel,
            format_views(item.view_count)
        ));
    }

    if snapshot.items.len() > MAX_LISTED_RESULTS {
        lines.push(format!(
            "...and {} more result(s).",
            snapshot.items.len() - MAX_LISTED_RESULTS
        ));
    }

    lines.join("\n")
}

pub fn format_views(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewfinder_core::domain::video::VideoResult;
    use viewfinder_core::types::date_range::DateRange;
    use viewfinder_core::types::duration::DurationFilter;
    use viewfinder_core::types::topic::Topic;

    fn video(id: usize) -> VideoResult {
        VideoResult {
            video_id: format!("id{id}"),
            title: format!("Video {id}"),
            description: String::new(),
            channel_title: "Channel".to_string(),
            published_at: None,
            thumbnail: None,
            view_count: 1_234_567,
            url: format!("https://www.youtube.com/watch?v=id{id}"),
        }
    }

    fn snapshot(count: usize) -> Snapshot {
        Snapshot {
            query: "lofi".to_string(),
            date_range: DateRange::Week,
            duration: DurationFilter::Any,
            topic: Topic::None,
            items: (0..count).map(video).collect(),
        }
    }

    #[test]
    fn groups_view_counts_by_thousands() {
        assert_eq!(format_views(0), "0");
        assert_eq!(format_views(999), "999");
        assert_eq!(format_views(1_000), "1,000");
        assert_eq!(format_views(1_234_567), "1,234,567");
    }

    #[test]
    fn message_lists_at_most_five_results() {
        let message = format_message(&snapshot(7));
        assert!(message.contains("5. [Video 4]"));
        assert!(!message.contains("6. [Video 5]"));
        assert!(message.ends_with("...and 2 more result(s)."));
    }

    #[test]
    fn short_list_has_no_trailer() {
        let message = format_message(&snapshot(2));
        assert!(!message.contains("more result(s)"));
    }

    #[test]
    fn empty_query_shows_topic_label() {
        let mut snapshot = snapshot(1);
        snapshot.query = String::new();
        snapshot.topic = Topic::Gaming;
        let message = format_message(&snapshot);
        assert!(message.contains("• Query: `Gaming (global)`"));
    }

    #[test]
    fn message_formats_views_inline() {
        let message = format_message(&snapshot(1));
        assert!(message.contains("1,234,567 views"));
    }
}
