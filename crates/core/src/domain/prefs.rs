use serde::{Deserialize, Serialize};

use crate::domain::search::DEFAULT_MAX_RESULTS;
use crate::types::date_range::DateRange;
use crate::types::duration::DurationFilter;
use crate::types::export_format::ExportFormat;
use crate::types::topic::Topic;

/// Search-form defaults a client may persist between visits. Every field
/// parses leniently, so a stale or hand-edited payload degrades to the
/// built-in defaults instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchDefaults {
    pub date_range: DateRange,
    pub duration: DurationFilter,
    pub topic: Topic,
    pub max_results: u32,
    pub format: ExportFormat,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            date_range: DateRange::default(),
            duration: DurationFilter::default(),
            topic: Topic::default(),
            max_results: DEFAULT_MAX_RESULTS,
            format: ExportFormat::default(),
        }
    }
}

impl SearchDefaults {
    pub fn clamped(mut self, cap: u32) -> Self {
        self.max_results = self.max_results.clamp(1, cap.max(1));
        self
    }
}
