//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Category tag of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    /// Chair announcements.
    System,
    /// A council member speaking to the topic.
    Discussion,
    /// A motion placed before the council.
    Motion,
    /// Vote or score announcements.
    Voting,
    /// Verdicts and adjournment.
    Conclusion,
    /// The human questioner.
    User,
    /// The chair answering the questioner.
    Response,
    /// A failure surfaced into the chat.
    Error,
}

/// A single message in a session transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub speaker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl Message {
    /// Creates a message stamped now with a fresh id.
    pub fn new(speaker: impl Into<String>, content: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker: speaker.into(),
            role: None,
            content: content.into(),
            timestamp: Utc::now(),
            kind,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}
