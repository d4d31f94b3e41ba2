//! Topic cache trait.
//!
//! The proposal form hands a topic to the meeting room through a single
//! cached slot. The meeting room consumes it with [`TopicCache::take`].

use crate::error::Result;
use crate::topic::Topic;

/// The key under which the pending topic is stored.
pub const CURRENT_MEETING_KEY: &str = "currentMeeting";

/// Single-slot storage for the topic awaiting a session.
pub trait TopicCache: Send + Sync {
    /// Stores `topic`, replacing any pending one.
    fn store(&self, topic: &Topic) -> Result<()>;

    /// Reads the pending topic without consuming it.
    fn load(&self) -> Result<Option<Topic>>;

    /// Removes the pending topic. Clearing an empty cache is not an error.
    fn clear(&self) -> Result<()>;

    /// Reads and removes the pending topic.
    fn take(&self) -> Result<Option<Topic>> {
        let topic = self.load()?;
        if topic.is_some() {
            self.clear()?;
        }
        Ok(topic)
    }
}
