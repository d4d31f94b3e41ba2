//! Parsing of scored critiques.
//!
//! Members are asked to answer as
//!
//! ```text
//! ANALYSIS: ...
//! SCORE: 7
//! REASONING: ...
//! ```
//!
//! Answers rarely follow the format exactly, so every part is optional:
//! a missing analysis or reasoning falls back to the whole answer and a
//! missing score to [`DEFAULT_SCORE`].

use once_cell::sync::Lazy;
use parliament_core::meeting::{DEFAULT_SCORE, MAX_SCORE, MIN_SCORE, PersonaScore};
use parliament_core::persona::Persona;
use regex::Regex;

static ANALYSIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)ANALYSIS:[\s*]*(.*?)[\s*]*(?:SCORE:|$)").unwrap());
static SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"SCORE:[\s*\[]*(-?\d+(?:\.\d+)?)").unwrap());
static REASONING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)REASONING:[\s*]*(.*)$").unwrap());

/// The three parts of a critique.
#[derive(Debug, Clone, PartialEq)]
pub struct Critique {
    pub analysis: String,
    pub score: f64,
    pub reasoning: String,
}

impl Critique {
    pub fn parse(response: &str) -> Self {
        let whole = response.trim();
        let analysis = capture(&ANALYSIS_RE, whole).unwrap_or(whole);
        let reasoning = capture(&REASONING_RE, whole).unwrap_or(whole);
        let score = capture(&SCORE_RE, whole)
            .and_then(|s| s.parse::<f64>().ok())
            .map(|s| s.clamp(MIN_SCORE, MAX_SCORE))
            .unwrap_or(DEFAULT_SCORE);

        Self {
            analysis: analysis.to_string(),
            score,
            reasoning: reasoning.to_string(),
        }
    }

    pub fn into_score(self, persona: &Persona) -> PersonaScore {
        PersonaScore {
            persona_id: persona.id.clone(),
            persona_name: persona.name.clone(),
            analysis: self.analysis,
            score: self.score,
            reasoning: self.reasoning,
        }
    }
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_well_formed_critique() {
        let critique = Critique::parse(
            "ANALYSIS: Bold but grounded.\nSCORE: 8.5\nREASONING: Precedent supports it.",
        );
        assert_eq!(critique.analysis, "Bold but grounded.");
        assert_eq!(critique.score, 8.5);
        assert_eq!(critique.reasoning, "Precedent supports it.");
    }

    #[test]
    fn test_missing_score_defaults() {
        let critique = Critique::parse("I refuse to number my feelings.");
        assert_eq!(critique.score, DEFAULT_SCORE);
        assert_eq!(critique.analysis, "I refuse to number my feelings.");
        assert_eq!(critique.reasoning, "I refuse to number my feelings.");
    }

    #[test]
    fn test_unparseable_score_defaults() {
        assert_eq!(Critique::parse("SCORE: high\nREASONING: x").score, DEFAULT_SCORE);
    }

    #[test]
    fn test_scores_are_clamped() {
        assert_eq!(Critique::parse("SCORE: 42").score, MAX_SCORE);
        assert_eq!(Critique::parse("SCORE: 0").score, MIN_SCORE);
        assert_eq!(Critique::parse("SCORE: -3").score, MIN_SCORE);
    }

    #[test]
    fn test_tolerates_markdown_and_brackets() {
        assert_eq!(Critique::parse("**SCORE:** 7/10").score, 7.0);
        assert_eq!(Critique::parse("SCORE: **7**/10").score, 7.0);
        assert_eq!(Critique::parse("SCORE: [6]").score, 6.0);
    }

    #[test]
    fn test_markdown_bold_labels_are_stripped() {
        let critique = Critique::parse(
            "**ANALYSIS:** Bold but grounded.\n**SCORE:** 7\n**REASONING:** Cheap to pilot.",
        );
        assert_eq!(critique.analysis, "Bold but grounded.");
        assert_eq!(critique.score, 7.0);
        assert_eq!(critique.reasoning, "Cheap to pilot.");
    }
}
