//! Meeting repository implementations.

use crate::paths::ParliamentPaths;
use async_trait::async_trait;
use parliament_core::error::{ParliamentError, Result};
use parliament_core::meeting::{Meeting, MeetingRepository};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Meetings held in process memory; gone when the process exits.
#[derive(Default)]
pub struct InMemoryMeetingRepository {
    meetings: RwLock<HashMap<String, Meeting>>,
}

impl InMemoryMeetingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MeetingRepository for InMemoryMeetingRepository {
    async fn find_by_id(&self, meeting_id: &str) -> Result<Option<Meeting>> {
        Ok(self.meetings.read().await.get(meeting_id).cloned())
    }

    async fn save(&self, meeting: &Meeting) -> Result<()> {
        self.meetings
            .write()
            .await
            .insert(meeting.id.clone(), meeting.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Meeting>> {
        let mut meetings: Vec<Meeting> = self.meetings.read().await.values().cloned().collect();
        meetings.sort_by_key(|m| m.created_at);
        Ok(meetings)
    }
}

/// One `<id>.json` file per meeting.
///
/// Directory structure:
/// ```text
/// meetings/
/// ├── 1f0c...e2.json
/// └── 9a7b...41.json
/// ```
pub struct JsonDirMeetingRepository {
    dir: PathBuf,
}

impl JsonDirMeetingRepository {
    /// Opens the repository at the default location.
    pub async fn default_location() -> Result<Self> {
        Self::new(ParliamentPaths::meetings_dir()?).await
    }

    /// Opens the repository, creating `dir` if needed.
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn meetings_dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, meeting_id: &str) -> Result<PathBuf> {
        let valid = !meeting_id.is_empty()
            && meeting_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ParliamentError::validation(format!(
                "Invalid meeting id: {meeting_id:?}"
            )));
        }
        Ok(self.dir.join(format!("{meeting_id}.json")))
    }

    async fn read(path: &Path) -> Result<Meeting> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl MeetingRepository for JsonDirMeetingRepository {
    async fn find_by_id(&self, meeting_id: &str) -> Result<Option<Meeting>> {
        let path = match self.file_for(meeting_id) {
            Ok(path) => path,
            Err(_) => return Ok(None),
        };
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        Self::read(&path).await.map(Some)
    }

    async fn save(&self, meeting: &Meeting) -> Result<()> {
        let path = self.file_for(&meeting.id)?;
        let tmp_path = self.dir.join(format!(".{}.json.tmp", meeting.id));
        let content = serde_json::to_string_pretty(meeting)?;

        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp_path, &path).await?;

        debug!(meeting_id = %meeting.id, "Meeting saved");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Meeting>> {
        let mut meetings = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_meeting = path.extension().is_some_and(|ext| ext == "json")
                && !entry.file_name().to_string_lossy().starts_with('.');
            if !is_meeting {
                continue;
            }
            match Self::read(&path).await {
                Ok(meeting) => meetings.push(meeting),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable meeting file"),
            }
        }
        meetings.sort_by_key(|m| m.created_at);
        Ok(meetings)
    }
}
