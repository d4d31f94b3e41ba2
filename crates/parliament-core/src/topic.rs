//! Discussion topics.
//!
//! A `TopicDraft` is what the user typed; a `Topic` is the validated,
//! immutable record a session is convened on.

use crate::error::{ParliamentError, Result};
use crate::timestamp::deserialize_utc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Proposer name used when the user leaves it blank.
pub const ANONYMOUS_PROPOSER: &str = "Anonymous";

/// Unvalidated topic input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDraft {
    pub text: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub proposer: Option<String>,
}

impl TopicDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_proposer(mut self, proposer: impl Into<String>) -> Self {
        self.proposer = Some(proposer.into());
        self
    }

    /// Rejects drafts whose text is empty or whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(ParliamentError::validation(
                "A topic is required before the parliament can convene",
            ));
        }
        Ok(())
    }

    /// Validates the draft and stamps it into a `Topic`.
    pub fn into_topic(self) -> Result<Topic> {
        self.stamp(Utc::now())
    }

    fn stamp(self, created_at: DateTime<Utc>) -> Result<Topic> {
        self.validate()?;

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let proposer = self
            .proposer
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| ANONYMOUS_PROPOSER.to_string());

        Ok(Topic {
            text: self.text.trim().to_string(),
            description,
            proposer,
            created_at,
        })
    }
}

/// A validated topic. Immutable once created.
///
/// Deserializing goes through the same checks as `TopicDraft::into_topic`,
/// so a blank stored topic is an error rather than a usable `Topic`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTopic")]
pub struct Topic {
    #[serde(rename = "topic")]
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "proposedBy")]
    proposer: String,
    #[serde(rename = "timestamp")]
    created_at: DateTime<Utc>,
}

/// Persisted shape of a `Topic`, before validation.
#[derive(Deserialize)]
struct StoredTopic {
    topic: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "proposedBy", default)]
    proposed_by: String,
    #[serde(deserialize_with = "deserialize_utc")]
    timestamp: DateTime<Utc>,
}

impl TryFrom<StoredTopic> for Topic {
    type Error = ParliamentError;

    fn try_from(stored: StoredTopic) -> Result<Self> {
        TopicDraft {
            text: stored.topic,
            description: stored.description,
            proposer: Some(stored.proposed_by),
        }
        .stamp(stored.timestamp)
    }
}

impl Topic {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn proposer(&self) -> &str {
        &self.proposer
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_topic_is_rejected() {
        assert!(TopicDraft::new("").into_topic().unwrap_err().is_validation());
        assert!(TopicDraft::new("   \n\t").validate().is_err());
    }

    #[test]
    fn test_topic_defaults_proposer_and_trims() {
        let topic = TopicDraft::new("  The Ethics of Artificial Consciousness ")
            .with_description("   ")
            .with_proposer("")
            .into_topic()
            .unwrap();

        assert_eq!(topic.text(), "The Ethics of Artificial Consciousness");
        assert_eq!(topic.description(), None);
        assert_eq!(topic.proposer(), ANONYMOUS_PROPOSER);
    }

    #[test]
    fn test_cache_wire_format() {
        let topic = TopicDraft::new("Urban transit")
            .with_description("Reduce congestion")
            .with_proposer("Urban Planning Council")
            .into_topic()
            .unwrap();

        let json = serde_json::to_value(&topic).unwrap();
        assert_eq!(json["topic"], "Urban transit");
        assert_eq!(json["description"], "Reduce congestion");
        assert_eq!(json["proposedBy"], "Urban Planning Council");
        assert!(json["timestamp"].is_string());

        let back: Topic = serde_json::from_value(json).unwrap();
        assert_eq!(back, topic);
    }

    #[test]
    fn test_stored_topic_is_normalized() {
        let json = r#"{"topic":"  Urban transit ","description":" ","proposedBy":"","timestamp":"2025-07-15T12:34:56.789Z"}"#;
        let topic: Topic = serde_json::from_str(json).unwrap();
        assert_eq!(topic.text(), "Urban transit");
        assert_eq!(topic.description(), None);
        assert_eq!(topic.proposer(), ANONYMOUS_PROPOSER);
        assert_eq!(topic.created_at().to_rfc3339(), "2025-07-15T12:34:56.789+00:00");
    }

    #[test]
    fn test_blank_stored_topic_is_rejected() {
        let json = r#"{"topic":"   ","proposedBy":"","timestamp":"2025-07-15T12:34:56Z"}"#;
        let err = serde_json::from_str::<Topic>(json).unwrap_err();
        assert!(err.to_string().contains("topic is required"), "{err}");
    }
}
