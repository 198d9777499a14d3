use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use viewfinder_core::domain::snapshot::Snapshot;
use viewfinder_core::domain::video::VideoResult;
use viewfinder_core::types::date_range::DateRange;
use viewfinder_core::types::duration::DurationFilter;
use viewfinder_core::types::export_format::ExportFormat;
use viewfinder_core::types::topic::Topic;

const DESCRIPTION_LIMIT: usize = 280;
const FALLBACK_TITLE: &str = "Untitled video";
const FALLBACK_CHANNEL: &str = "Unknown";

pub fn render(
    snapshot: &Snapshot,
    format: ExportFormat,
    saved_at: DateTime<Utc>,
) -> Result<String, super::ArchiveError> {
    match format {
        ExportFormat::Text => Ok(render_text(snapshot, saved_at)),
        ExportFormat::Json => render_json(snapshot, saved_at),
        ExportFormat::Csv => render_csv(snapshot, saved_at),
    }
}

fn iso_second(stamp: DateTime<Utc>) -> String {
    stamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn render_text(snapshot: &Snapshot, saved_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        "YouTube Search Snapshot".to_string(),
        format!("Saved at: {}", iso_second(saved_at)),
        format!("Query: {}", snapshot.query),
        format!("Date range: {}", snapshot.date_range.key()),
        format!("Duration filter: {}", snapshot.duration.key()),
        format!("Topic filter: {}", snapshot.topic.label()),
        format!("Results captured: {}", snapshot.items.len()),
        String::new(),
    ];

    for (idx, item) in snapshot.items.iter().enumerate() {
        lines.push(format!(
            "{}. {} ({})",
            idx + 1,
            display_title(item),
            item.url
        ));
        lines.push(format!(
            "    Channel: {} | Published: {} | Views: {}",
            display_channel(item),
            item.published_at
                .map(iso_second)
                .unwrap_or_else(|| "Unknown".to_string()),
            item.view_count
        ));
        if !item.description.is_empty() {
            lines.push(format!(
                "    Description: {}",
                truncate_chars(&item.description, DESCRIPTION_LIMIT)
            ));
        }
        lines.push(String::new());
    }

    let mut text = lines.join("\n");
    while text.ends_with('\n') {
        text.pop();
    }
    text.push('\n');
    text
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedSnapshot<'a> {
    saved_at: String,
    query: &'a str,
    date_range: DateRange,
    duration: DurationFilter,
    topic: Topic,
    items: &'a [VideoResult],
}

fn render_json(
    snapshot: &Snapshot,
    saved_at: DateTime<Utc>,
) -> Result<String, super::ArchiveError> {
    let payload = SavedSnapshot {
        saved_at: iso_second(saved_at),
        query: &snapshot.query,
        date_range: snapshot.date_range,
        duration: snapshot.duration,
        topic: snapshot.topic,
        items: &snapshot.items,
    };
    let mut rendered = serde_json::to_string_pretty(&payload)
        .map_err(|err| super::ArchiveError::Render(err.to_string()))?;
    rendered.push('\n');
    Ok(rendered)
}

fn render_csv(
    snapshot: &Snapshot,
    saved_at: DateTime<Utc>,
) -> Result<String, super::ArchiveError> {
    let saved_at = iso_second(saved_at);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "query",
            "dateRange",
            "duration",
            "topic",
            "savedAt",
            "title",
            "url",
            "channelTitle",
            "publishedAt",
            "viewCount",
            "description",
        ])
        .map_err(|err| super::ArchiveError::Render(err.to_string()))?;
    for item in &snapshot.items {
        writer
            .write_record([
                snapshot.query.as_str(),
                snapshot.date_range.key(),
                snapshot.duration.key(),
                snapshot.topic.key(),
                saved_at.as_str(),
                item.title.as_str(),
                item.url.as_str(),
                item.channel_title.as_str(),
                item.published_at.map(iso_second).unwrap_or_default().as_str(),
                item.view_count.to_string().as_str(),
                item.description.as_str(),
            ])
            .map_err(|err| super::ArchiveError::Render(err.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| super::ArchiveError::Render(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| super::ArchiveError::Render(err.to_string()))
}

fn display_title(item: &VideoResult) -> &str {
    if item.title.is_empty() {
        FALLBACK_TITLE
    } else {
        &item.title
    }
}

fn display_channel(item: &VideoResult) -> &str {
    if item.channel_title.is_empty() {
        FALLBACK_CHANNEL
    } else {
        &item.channel_title
    }
}

fn truncate_chars(input: &str, limit: usize) -> &str {
    match input.char_indices().nth(limit) {
        Some((offset, _)) => &input[..offset],
        None => input,
    }
}
