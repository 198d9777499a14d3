pub mod render;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use viewfinder_core::domain::snapshot::Snapshot;
use viewfinder_core::types::export_format::ExportFormat;
use viewfinder_core::types::slug::slugify;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("unable to write snapshot: {0}")]
    Write(#[source] io::Error),
    #[error("unable to render snapshot: {0}")]
    Render(String),
    #[error("unable to list archive: {0}")]
    List(#[source] io::Error),
    #[error("unable to read snapshot: {0}")]
    Read(#[source] io::Error),
    #[error("removed {deleted} file(s), then failed: {source}")]
    Clear {
        deleted: usize,
        #[source]
        source: io::Error,
    },
    #[error("no such snapshot")]
    NotFound,
    #[error("invalid snapshot name")]
    InvalidName,
}

/// Filesystem metadata for one archived snapshot, derived at listing time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// One directory of snapshot files. Uniqueness of concurrent saves comes
/// from `create_new` plus a numeric suffix retry, so no in-process locking
/// is needed; a save racing a clear resolves at filesystem granularity.
pub struct SnapshotArchive {
    root: PathBuf,
}

impl SnapshotArchive {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(ArchiveError::Write)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Render `snapshot` in `format` and write it under a timestamped name,
    /// returning the filename. Never overwrites an existing file.
    pub fn save(
        &self,
        snapshot: &Snapshot,
        format: ExportFormat,
        saved_at: DateTime<Utc>,
    ) -> Result<String, ArchiveError> {
        let contents = render::render(snapshot, format, saved_at)?;
        let base = format!(
            "{}_{}",
            saved_at.format("%Y%m%d_%H%M%S"),
            slugify(&snapshot.query)
        );
        let mut attempt = 1u32;
        loop {
            let name = if attempt == 1 {
                format!("{base}.{}", format.extension())
            } else {
                format!("{base}_{attempt}.{}", format.extension())
            };
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.root.join(&name))
            {
                Ok(mut file) => {
                    file.write_all(contents.as_bytes())
                        .map_err(ArchiveError::Write)?;
                    return Ok(name);
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    attempt += 1;
                }
                Err(err) => return Err(ArchiveError::Write(err)),
            }
        }
    }

    /// Enumerate archived snapshots, newest first (modification time
    /// descending, filename descending as tie-break). Directories and
    /// dotfiles are skipped.
    pub fn list(&self) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(ArchiveError::List)? {
            let entry = entry.map_err(ArchiveError::List)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let metadata = entry.metadata().map_err(ArchiveError::List)?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .map_err(ArchiveError::List)?;
            entries.push(ArchiveEntry {
                name,
                size: metadata.len(),
                modified,
            });
        }
        entries.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(entries)
    }

    /// Best-effort removal of every snapshot file. The sweep continues past
    /// individual failures; if any occurred, the error carries the count of
    /// files that were removed and the first cause.
    pub fn clear(&self) -> Result<usize, ArchiveError> {
        let mut deleted = 0usize;
        let mut first_error: Option<io::Error> = None;
        for entry in fs::read_dir(&self.root).map_err(ArchiveError::List)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    first_error.get_or_insert(err);
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    first_error.get_or_insert(err);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => deleted += 1,
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(source) => Err(ArchiveError::Clear { deleted, source }),
            None => Ok(deleted),
        }
    }

    /// Raw bytes of one archived file. Name validation happens before any
    /// filesystem access, so traversal attempts never leave the archive.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        if !is_safe_name(name) {
            return Err(ArchiveError::InvalidName);
        }
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(ArchiveError::NotFound);
        }
        fs::read(&path).map_err(ArchiveError::Read)
    }
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;
    use viewfinder_core::domain::video::VideoResult;
    use viewfinder_core::types::date_range::DateRange;
    use viewfinder_core::types::duration::DurationFilter;
    use viewfinder_core::types::topic::Topic;

    fn saved_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    fn video(title: &str, views: u64) -> VideoResult {
        VideoResult {
            video_id: "dQw4w9WgXcQ".to_string(),
            title: title.to_string(),
            description: "a description, with a comma".to_string(),
            channel_title: "Channel".to_string(),
            published_at: Some(saved_at()),
            thumbnail: None,
            view_count: views,
            url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            query: "lofi hip hop".to_string(),
            date_range: DateRange::Week,
            duration: DurationFilter::Any,
            topic: Topic::None,
            items: vec![video("First video", 500), video("Second video", 100)],
        }
    }

    #[test]
    fn save_names_embed_timestamp_and_slug() {
        let dir = TempDir::new().unwrap();
        let archive = SnapshotArchive::open(dir.path()).unwrap();
        let name = archive
            .save(&snapshot(), ExportFormat::Text, saved_at())
            .unwrap();
        assert_eq!(name, "20240515_120000_lofi-hip-hop.txt");
    }

    #[test]
    fn colliding_saves_get_a_suffix() {
        let dir = TempDir::new().unwrap();
        let archive = SnapshotArchive::open(dir.path()).unwrap();
        let first = archive
            .save(&snapshot(), ExportFormat::Json, saved_at())
            .unwrap();
        let second = archive
            .save(&snapshot(), ExportFormat::Json, saved_at())
            .unwrap();
        assert_eq!(first, "20240515_120000_lofi-hip-hop.json");
        assert_eq!(second, "20240515_120000_lofi-hip-hop_2.json");
    }

    #[test]
    fn json_save_round_trips_items() {
        let dir = TempDir::new().unwrap();
        let archive = SnapshotArchive::open(dir.path()).unwrap();
        let original = snapshot();
        let name = archive
            .save(&original, ExportFormat::Json, saved_at())
            .unwrap();
        let bytes = archive.read(&name).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed["query"], "lofi hip hop");
        assert_eq!(parsed["savedAt"], "2024-05-15T12:00:00Z");
        let items: Vec<VideoResult> =
            serde_json::from_value(parsed["items"].clone()).unwrap();
        assert_eq!(items, original.items);
    }

    #[test]
    fn text_save_contains_titles_and_urls() {
        let dir = TempDir::new().unwrap();
        let archive = SnapshotArchive::open(dir.path()).unwrap();
        let name = archive
            .save(&snapshot(), ExportFormat::Text, saved_at())
            .unwrap();
        let text = String::from_utf8(archive.read(&name).unwrap()).unwrap();
        assert!(text.contains("First video"));
        assert!(text.contains("Second video"));
        assert!(text.contains("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
    }

    #[test]
    fn csv_save_survives_commas_in_fields() {
        let dir = TempDir::new().unwrap();
        let archive = SnapshotArchive::open(dir.path()).unwrap();
        let mut single = snapshot();
        single.items.truncate(1);
        let name = archive
            .save(&single, ExportFormat::Csv, saved_at())
            .unwrap();
        let bytes = archive.read(&name).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 11);
        assert_eq!(&rows[0][10], "a description, with a comma");
    }

    #[test]
    fn list_returns_saved_files_newest_first() {
        let dir = TempDir::new().unwrap();
        let archive = SnapshotArchive::open(dir.path()).unwrap();
        let first = archive
            .save(&snapshot(), ExportFormat::Text, saved_at())
            .unwrap();
        let second = archive
            .save(&snapshot(), ExportFormat::Json, saved_at())
            .unwrap();
        let listed = archive.list().unwrap();
        assert_eq!(listed.len(), 2);
        let names: Vec<&str> = listed.iter().map(|entry| entry.name.as_str()).collect();
        assert!(names.contains(&first.as_str()));
        assert!(names.contains(&second.as_str()));
        assert!(listed[0].modified >= listed[1].modified);
    }

    #[test]
    fn list_skips_dotfiles_and_directories() {
        let dir = TempDir::new().unwrap();
        let archive = SnapshotArchive::open(dir.path()).unwrap();
        fs::write(dir.path().join(".gitkeep"), b"").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        assert!(archive.list().unwrap().is_empty());
    }

    #[test]
    fn clear_removes_files_and_reports_count() {
        let dir = TempDir::new().unwrap();
        let archive = SnapshotArchive::open(dir.path()).unwrap();
        archive
            .save(&snapshot(), ExportFormat::Text, saved_at())
            .unwrap();
        archive
            .save(&snapshot(), ExportFormat::Csv, saved_at())
            .unwrap();
        fs::write(dir.path().join(".gitkeep"), b"").unwrap();
        assert_eq!(archive.clear().unwrap(), 2);
        assert!(archive.list().unwrap().is_empty());
        assert!(dir.path().join(".gitkeep").exists());
    }

    #[test]
    fn read_rejects_traversal_names() {
        let dir = TempDir::new().unwrap();
        let archive = SnapshotArchive::open(dir.path()).unwrap();
        for name in [
            "../../etc/passwd",
            "..",
            "a/b.txt",
            "a\\b.txt",
            ".hidden",
            "",
        ] {
            assert!(
                matches!(archive.read(name), Err(ArchiveError::InvalidName)),
                "{name:?} should be invalid"
            );
        }
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let archive = SnapshotArchive::open(dir.path()).unwrap();
        assert!(matches!(
            archive.read("20240515_120000_missing.txt"),
            Err(ArchiveError::NotFound)
        ));
    }
}
