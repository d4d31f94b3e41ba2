//! Meeting domain model.
//!
//! These types are also the JSON wire format of the council HTTP backend,
//! which is why field names stay snake_case and `stage` travels as `phase`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

use crate::error::{ParliamentError, Result};
use crate::session::DeliberationStage;
use crate::timestamp::deserialize_utc;
use crate::topic::{ANONYMOUS_PROPOSER, Topic};

/// Score assumed when a critique carries no readable score.
pub const DEFAULT_SCORE: f64 = 5.0;
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Lifecycle status of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MeetingStatus {
    #[default]
    Active,
    Analyzing,
    Completed,
}

/// Request body for convening a meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub topic: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_proposer")]
    pub proposer: String,
}

fn default_proposer() -> String {
    ANONYMOUS_PROPOSER.to_string()
}

impl MeetingRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            description: None,
            proposer: default_proposer(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(ParliamentError::validation("meeting topic must not be empty"));
        }
        Ok(())
    }
}

impl From<&Topic> for MeetingRequest {
    fn from(topic: &Topic) -> Self {
        Self {
            topic: topic.text().to_string(),
            description: topic.description().map(str::to_string),
            proposer: topic.proposer().to_string(),
        }
    }
}

/// One persona's critique of an idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaScore {
    pub persona_id: String,
    pub persona_name: String,
    pub analysis: String,
    pub score: f64,
    pub reasoning: String,
}

impl PersonaScore {
    /// Mean of the scores rounded to two decimals; `0.0` for no scores.
    pub fn average(scores: &[PersonaScore]) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        let total: f64 = scores.iter().map(|s| s.score).sum();
        round2(total / scores.len() as f64)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// An idea proposed by one persona during the inspiration stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub persona_id: String,
    pub persona_name: String,
    pub idea: String,
    #[serde(default)]
    pub scores: Vec<PersonaScore>,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub discussion: Vec<String>,
}

impl Idea {
    pub fn new(
        persona_id: impl Into<String>,
        persona_name: impl Into<String>,
        idea: impl Into<String>,
    ) -> Self {
        Self {
            persona_id: persona_id.into(),
            persona_name: persona_name.into(),
            idea: idea.into(),
            scores: Vec::new(),
            average_score: 0.0,
            discussion: Vec::new(),
        }
    }

    /// Replaces the scores and recomputes the average.
    pub fn record_scores(&mut self, scores: Vec<PersonaScore>) {
        self.average_score = PersonaScore::average(&scores);
        self.scores = scores;
    }
}

/// The closing report of a finalized meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub winning_idea: Idea,
    pub implementation_plan: String,
    pub follow_up_questions: String,
    pub final_score: f64,
    pub total_ideas_evaluated: usize,
    #[serde(deserialize_with = "deserialize_utc")]
    pub generated_at: DateTime<Utc>,
}

/// A deliberation session held by a council backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub topic: String,
    #[serde(default)]
    pub description: Option<String>,
    pub proposer: String,
    #[serde(default)]
    pub status: MeetingStatus,
    #[serde(rename = "phase")]
    pub stage: DeliberationStage,
    #[serde(deserialize_with = "deserialize_utc")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub ideas: Vec<Idea>,
    #[serde(default)]
    pub current_idea_index: usize,
    #[serde(default)]
    pub discussion_round: u32,
    #[serde(default)]
    pub final_report: Option<FinalReport>,
}

impl Meeting {
    /// Opens a new meeting from a validated request.
    pub fn open(request: MeetingRequest) -> Result<Self> {
        request.validate()?;
        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let proposer = match request.proposer.trim() {
            "" => default_proposer(),
            p => p.to_string(),
        };
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            topic: request.topic.trim().to_string(),
            description,
            proposer,
            status: MeetingStatus::Active,
            stage: DeliberationStage::Inspiration,
            created_at: Utc::now(),
            ideas: Vec::new(),
            current_idea_index: 0,
            discussion_round: 0,
            final_report: None,
        })
    }

    /// The idea with the highest average score; the earliest wins a tie.
    pub fn winning_idea(&self) -> Option<&Idea> {
        self.ideas.iter().fold(None, |best: Option<&Idea>, idea| match best {
            Some(b) if b.average_score >= idea.average_score => Some(b),
            _ => Some(idea),
        })
    }

    pub fn idea(&self, index: usize) -> Result<&Idea> {
        self.ideas.get(index).ok_or(ParliamentError::InvalidIdeaIndex {
            index,
            len: self.ideas.len(),
        })
    }

    pub fn is_finalized(&self) -> bool {
        self.final_report.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(persona: &str, value: f64) -> PersonaScore {
        PersonaScore {
            persona_id: persona.to_string(),
            persona_name: persona.to_string(),
            analysis: String::new(),
            score: value,
            reasoning: String::new(),
        }
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        let scores = vec![score("a", 7.0), score("b", 8.0), score("c", 8.0)];
        assert_eq!(PersonaScore::average(&scores), 7.67);
        assert_eq!(PersonaScore::average(&[]), 0.0);
    }

    #[test]
    fn test_open_trims_and_defaults() {
        let mut request = MeetingRequest::new("  Build a library  ");
        request.description = Some("   ".into());
        request.proposer = " ".into();
        let meeting = Meeting::open(request).unwrap();
        assert_eq!(meeting.topic, "Build a library");
        assert_eq!(meeting.description, None);
        assert_eq!(meeting.proposer, "Anonymous");
        assert_eq!(meeting.status, MeetingStatus::Active);
        assert_eq!(meeting.stage, DeliberationStage::Inspiration);
    }

    #[test]
    fn test_open_rejects_blank_topic() {
        let err = Meeting::open(MeetingRequest::new("  ")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_winning_idea_prefers_first_on_tie() {
        let mut meeting = Meeting::open(MeetingRequest::new("t")).unwrap();
        for (id, avg) in [("mouse", 6.5), ("dolphin", 8.0), ("id", 8.0)] {
            let mut idea = Idea::new(id, id, "x");
            idea.average_score = avg;
            meeting.ideas.push(idea);
        }
        assert_eq!(meeting.winning_idea().unwrap().persona_id, "dolphin");
    }

    #[test]
    fn test_idea_index_out_of_range() {
        let meeting = Meeting::open(MeetingRequest::new("t")).unwrap();
        assert!(matches!(
            meeting.idea(0),
            Err(ParliamentError::InvalidIdeaIndex { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_wire_format_uses_phase_key() {
        let meeting = Meeting::open(MeetingRequest::new("t")).unwrap();
        let json = serde_json::to_value(&meeting).unwrap();
        assert_eq!(json["phase"], "inspiration");
        assert_eq!(json["status"], "active");

        let request: MeetingRequest = serde_json::from_str(r#"{"topic":"x"}"#).unwrap();
        assert_eq!(request.proposer, "Anonymous");
    }

    #[test]
    fn test_decodes_naive_backend_timestamps() {
        let json = r#"{
            "id": "5b0c",
            "topic": "Reduce food waste",
            "description": null,
            "proposer": "Anonymous",
            "status": "completed",
            "phase": "completed",
            "created_at": "2025-07-15T12:34:56.789012",
            "ideas": [],
            "current_idea_index": 0,
            "discussion_round": 0,
            "final_report": {
                "winning_idea": {
                    "persona_id": "ego",
                    "persona_name": "EGO",
                    "idea": "Compost",
                    "scores": [],
                    "average_score": 0,
                    "discussion": []
                },
                "implementation_plan": "plan",
                "follow_up_questions": "questions",
                "final_score": 0,
                "total_ideas_evaluated": 1,
                "generated_at": "2025-07-15T12:40:00.000001"
            }
        }"#;
        let meeting: Meeting = serde_json::from_str(json).unwrap();
        assert_eq!(meeting.description, None);
        assert_eq!(meeting.created_at.to_rfc3339(), "2025-07-15T12:34:56.789012+00:00");
        let report = meeting.final_report.unwrap();
        assert_eq!(report.generated_at.timestamp(), meeting.created_at.timestamp() + 304);
    }
}
