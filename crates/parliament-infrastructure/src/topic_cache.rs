//! Topic cache implementations.
//!
//! The file cache keeps a JSON object with the single key
//! `currentMeeting`, the same slot the proposal form writes. Slots are kept
//! as raw JSON so an invalid entry can still be replaced or cleared; it only
//! fails when read back as a `Topic`.

use crate::paths::ParliamentPaths;
use crate::storage::AtomicFile;
use parliament_core::cache::{CURRENT_MEETING_KEY, TopicCache};
use parliament_core::error::{ParliamentError, Result};
use parliament_core::topic::Topic;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

type CacheSlots = BTreeMap<String, serde_json::Value>;

/// Topic cache persisted to a JSON file.
pub struct FileTopicCache {
    file: AtomicFile<CacheSlots>,
}

impl FileTopicCache {
    /// Uses the default cache file location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(ParliamentPaths::topic_cache_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicFile::json(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl TopicCache for FileTopicCache {
    fn store(&self, topic: &Topic) -> Result<()> {
        let value = serde_json::to_value(topic)?;
        self.file.update(CacheSlots::new(), |slots| {
            slots.insert(CURRENT_MEETING_KEY.to_string(), value);
            Ok(())
        })?;
        debug!(topic = topic.text(), "Topic cached");
        Ok(())
    }

    fn load(&self) -> Result<Option<Topic>> {
        let Some(value) = self
            .file
            .load()?
            .and_then(|mut slots| slots.remove(CURRENT_MEETING_KEY))
        else {
            return Ok(None);
        };
        serde_json::from_value(value).map(Some).map_err(|e| {
            ParliamentError::validation(format!(
                "Cached topic in {} is invalid: {e}",
                self.path().display()
            ))
        })
    }

    fn clear(&self) -> Result<()> {
        if self.file.load()?.is_none() {
            return Ok(());
        }
        self.file.update(CacheSlots::new(), |slots| {
            slots.remove(CURRENT_MEETING_KEY);
            Ok(())
        })
    }
}

/// In-process topic cache.
#[derive(Default)]
pub struct MemoryTopicCache {
    slot: Mutex<Option<Topic>>,
}

impl MemoryTopicCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TopicCache for MemoryTopicCache {
    fn store(&self, topic: &Topic) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(topic.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Topic>> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    fn take(&self) -> Result<Option<Topic>> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).take())
    }
}
