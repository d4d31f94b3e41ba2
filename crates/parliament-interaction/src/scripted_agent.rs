//! Offline agent with deterministic answers.
//!
//! Lets a full deliberation run without network access or API keys. The
//! agent recognises which stage is asking from the prompt itself and
//! answers in the shape that stage expects; scores are derived from a
//! hash of the persona and the prompt so reruns agree.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use parliament_core::agent::{AgentError, CouncilAgent, Prompt};
use parliament_core::persona::{Persona, Temperament};
use regex::Regex;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());

pub struct ScriptedAgent {
    persona_id: String,
    temperament: Temperament,
}

impl ScriptedAgent {
    pub fn new(persona: &Persona) -> Self {
        Self {
            persona_id: persona.id.clone(),
            temperament: persona.temperament,
        }
    }

    fn score_for(&self, prompt: &Prompt) -> u8 {
        let mut hasher = DefaultHasher::new();
        self.persona_id.hash(&mut hasher);
        prompt.message.hash(&mut hasher);
        // 4..=9 keeps offline scores away from the extremes
        4 + (hasher.finish() % 6) as u8
    }

    fn idea(&self, subject: &str) -> String {
        let angle = match self.temperament {
            Temperament::Historical => "Study three past attempts at",
            Temperament::Futuristic => "Prototype a ten-year roadmap for",
            Temperament::Analytical => "Map the feedback loops that drive",
            Temperament::Contextual => "Run listening sessions with the people affected by",
            Temperament::Academic => "Commission a cross-disciplinary review of",
            Temperament::Mystical => "Hold a symbolic ritual launch for",
            Temperament::Contrarian => "Appoint a red team to argue against",
            Temperament::Artistic => "Publish an illustrated manifesto for",
            Temperament::Impulsive => "Start a one-week pilot of",
            Temperament::Balanced => "Phase in a budget-capped version of",
            Temperament::Ethical => "Draft a charter of obligations for",
        };
        format!("{angle} {subject}.")
    }
}

#[async_trait]
impl CouncilAgent for ScriptedAgent {
    fn expertise(&self) -> &str {
        "scripted offline agent"
    }

    async fn execute(&self, prompt: Prompt) -> Result<String, AgentError> {
        let message = &prompt.message;
        let subject = QUOTED
            .captures(message)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "the matter before the council".to_string());

        let answer = if message.contains("SCORE:") {
            let score = self.score_for(&prompt);
            format!(
                "ANALYSIS: Seen through a {} lens, \"{subject}\" holds together.\n\
                 SCORE: {score}\n\
                 REASONING: It balances ambition against what can be delivered.",
                self.temperament
            )
        } else if message.contains("implementation report") {
            "1. Executive Summary: adopt the winning idea in a limited pilot.\n\
             2. Plan: scope, pilot, review, expand.\n\
             3. Resources: a small cross-functional team.\n\
             4. Timeline: twelve weeks.\n\
             5. Success metrics: adoption, satisfaction, cost."
                .to_string()
        } else if message.contains("follow-up questions") {
            "1. Who is affected first?\n\
             2. What does success look like in a year?\n\
             3. What would make us stop?\n\
             4. Which resources are already available?\n\
             5. Who else has tried this?"
                .to_string()
        } else {
            self.idea(&subject)
        };
        Ok(answer)
    }
}
