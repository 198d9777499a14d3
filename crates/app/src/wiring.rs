use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::state::AppState;
use viewfinder_infra::archive::{ArchiveError, SnapshotArchive};
use viewfinder_infra::prefs::PrefsStore;
use viewfinder_infra::webhook::WebhookNotifier;
use viewfinder_infra::youtube::YouTubeClient;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub fn build_state(config: AppConfig) -> Result<AppState, WiringError> {
    let archive = SnapshotArchive::open(config.archive_dir())?;
    let prefs = PrefsStore::new(config.prefs_path());
    let client = Client::builder().timeout(config.request_timeout).build()?;
    let youtube = config
        .youtube_api_key
        .as_ref()
        .map(|key| Arc::new(YouTubeClient::new(client.clone(), key.clone())));
    let notifier = config
        .webhook_url
        .as_ref()
        .map(|url| Arc::new(WebhookNotifier::new(client.clone(), url.clone())));
    Ok(AppState {
        config: Arc::new(config),
        archive: Arc::new(archive),
        prefs: Arc::new(prefs),
        youtube,
        notifier,
    })
}
