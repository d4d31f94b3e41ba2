//! Prompt templates for the deliberation stages.

use minijinja::{Environment, context};
use parliament_core::error::{ParliamentError, Result};
use parliament_core::meeting::{Idea, Meeting};
use serde::Serialize;

const IDEA: &str = r#"The parliament seeks your wisdom on: "{{ topic }}".
{%- if description %} {{ description }}{% endif %}

Provide ONE specific, actionable idea related to this topic. Keep it concise but innovative."#;

const IDEAS_CONTEXT: &str = r#"Topic: {{ topic }}. All ideas being considered:
{% for idea in ideas -%}
- {{ idea }}
{% endfor %}"#;

const CRITIQUE: &str = r#"The parliament is now evaluating this idea: "{{ idea }}" (proposed by {{ proposer }}).

Please:
1. Provide your analysis and critique of this idea
2. Suggest improvements or concerns
3. Rate it on a scale of 1-10 (1=terrible, 10=brilliant)
4. Give reasons for your score

Format your response as:
ANALYSIS: [your analysis]
SCORE: [number between 1-10]
REASONING: [why you gave this score]"#;

const VERDICT_CONTEXT: &str = r#"The parliament has deliberated on "{{ topic }}" and chosen the winning idea: "{{ winner.idea }}" (Score: {{ winner.average_score }}/10).
{% if others %}
Other ideas considered:
{% for other in others -%}
- {{ other.idea }} (score {{ other.average_score }})
{% endfor %}{% endif %}"#;

const IMPLEMENTATION_PLAN: &str = r#"As {{ chair }}, provide a comprehensive implementation report with:
1. Executive Summary
2. Step-by-step implementation plan
3. Resource requirements
4. Timeline
5. Success metrics"#;

const FOLLOW_UP: &str = "Based on the parliament's deliberations, what are the top 5 most important \
follow-up questions the human should ask to refine this idea further?";

#[derive(Serialize)]
struct ScoredIdea<'a> {
    idea: &'a str,
    average_score: f64,
}

impl<'a> From<&'a Idea> for ScoredIdea<'a> {
    fn from(idea: &'a Idea) -> Self {
        Self {
            idea: &idea.idea,
            average_score: idea.average_score,
        }
    }
}

/// The compiled deliberation templates.
pub struct PromptBook {
    env: Environment<'static>,
}

impl PromptBook {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in [
            ("idea", IDEA),
            ("ideas_context", IDEAS_CONTEXT),
            ("critique", CRITIQUE),
            ("verdict_context", VERDICT_CONTEXT),
            ("implementation_plan", IMPLEMENTATION_PLAN),
        ] {
            env.add_template(name, source).map_err(template_error)?;
        }
        Ok(Self { env })
    }

    /// Asks a member for one idea on the meeting's topic.
    pub fn idea(&self, meeting: &Meeting) -> Result<String> {
        self.render(
            "idea",
            context! { topic => &meeting.topic, description => &meeting.description },
        )
    }

    /// Shared context for every critique: the topic and the full idea list.
    pub fn ideas_context(&self, meeting: &Meeting) -> Result<String> {
        let ideas: Vec<&str> = meeting.ideas.iter().map(|i| i.idea.as_str()).collect();
        self.render(
            "ideas_context",
            context! { topic => &meeting.topic, ideas => ideas },
        )
    }

    pub fn critique(&self, idea: &Idea) -> Result<String> {
        self.render(
            "critique",
            context! { idea => &idea.idea, proposer => &idea.persona_name },
        )
    }

    /// Context for the closing stage: the winner and every other idea.
    pub fn verdict_context(&self, meeting: &Meeting, winner: &Idea) -> Result<String> {
        let others: Vec<ScoredIdea<'_>> = meeting
            .ideas
            .iter()
            .filter(|i| *i != winner)
            .map(ScoredIdea::from)
            .collect();
        self.render(
            "verdict_context",
            context! {
                topic => &meeting.topic,
                winner => ScoredIdea::from(winner),
                others => others,
            },
        )
    }

    pub fn implementation_plan(&self, chair: &str) -> Result<String> {
        self.render("implementation_plan", context! { chair => chair })
    }

    pub fn follow_up(&self) -> String {
        FOLLOW_UP.to_string()
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|t| t.render(ctx))
            .map_err(template_error)
    }
}

fn template_error(e: minijinja::Error) -> ParliamentError {
    ParliamentError::internal(format!("prompt template error: {e}"))
}
