use std::sync::Arc;

use crate::config::AppConfig;
use viewfinder_infra::archive::SnapshotArchive;
use viewfinder_infra::prefs::PrefsStore;
use viewfinder_infra::webhook::WebhookNotifier;
use viewfinder_infra::youtube::YouTubeClient;

/// Shared per-request state: immutable config plus stateless adapters.
/// `youtube` and `notifier` are absent when their configuration is missing;
/// the corresponding routes answer with a configuration error instead.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub archive: Arc<SnapshotArchive>,
    pub prefs: Arc<PrefsStore>,
    pub youtube: Option<Arc<YouTubeClient>>,
    pub notifier: Option<Arc<WebhookNotifier>>,
}
