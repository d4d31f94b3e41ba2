//! In-process council backend.
//!
//! Holds one agent per seat and walks a meeting through inspiration,
//! analysis and finalization, persisting every step through a
//! `MeetingRepository`. A failing agent never fails the step: its seat
//! contributes a "mystical disturbance" notice instead.

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use parliament_core::agent::{CouncilAgent, Prompt};
use parliament_core::error::{ParliamentError, Result};
use parliament_core::meeting::{
    CouncilBackend, FinalReport, Idea, Meeting, MeetingRepository, MeetingRequest, MeetingStatus,
};
use parliament_core::persona::{Persona, PersonaCatalog};
use parliament_core::session::DeliberationStage;
use std::sync::Arc;
use tracing::{info, warn};

use super::prompts::PromptBook;
use super::scoring::Critique;

/// A persona and the agent speaking for it.
#[derive(Clone)]
struct Seat {
    persona: Persona,
    agent: Arc<dyn CouncilAgent>,
}

/// Runs deliberations against the seated council.
pub struct DeliberationService {
    seats: Vec<Seat>,
    mediator: usize,
    scholar: usize,
    repository: Arc<dyn MeetingRepository>,
    prompts: PromptBook,
}

impl DeliberationService {
    /// Seats `agents[i]` in the chair of `catalog`'s i-th persona.
    pub fn new(
        catalog: &PersonaCatalog,
        agents: Vec<Arc<dyn CouncilAgent>>,
        repository: Arc<dyn MeetingRepository>,
    ) -> Result<Self> {
        if agents.len() != catalog.len() {
            return Err(ParliamentError::config(format!(
                "{} agents for {} council seats",
                agents.len(),
                catalog.len()
            )));
        }
        let seats: Vec<Seat> = catalog
            .iter()
            .cloned()
            .zip(agents)
            .map(|(persona, agent)| Seat { persona, agent })
            .collect();
        let position = |id: &str| seats.iter().position(|s| s.persona.id == id).unwrap_or(0);
        let mediator = position(&catalog.mediator().id);
        let scholar = position(&catalog.scholar().id);

        Ok(Self {
            seats,
            mediator,
            scholar,
            repository,
            prompts: PromptBook::new()?,
        })
    }

    pub async fn create_meeting(&self, request: MeetingRequest) -> Result<Meeting> {
        let meeting = Meeting::open(request)?;
        self.repository.save(&meeting).await?;
        info!(meeting_id = %meeting.id, topic = %meeting.topic, "Meeting convened");
        Ok(meeting)
    }

    pub async fn get_meeting(&self, meeting_id: &str) -> Result<Meeting> {
        self.repository
            .find_by_id(meeting_id)
            .await?
            .ok_or_else(|| ParliamentError::not_found("meeting", meeting_id))
    }

    /// Every member proposes one idea; ideas are kept in seating order.
    pub async fn start_deliberation(&self, meeting_id: &str) -> Result<Vec<Idea>> {
        let mut meeting = self.get_meeting(meeting_id).await?;
        if meeting.is_finalized() {
            return Err(ParliamentError::validation(format!(
                "meeting {meeting_id} is already finalized"
            )));
        }

        let prompt = Prompt::new(self.prompts.idea(&meeting)?);
        let answers = join_all(self.seats.iter().map(|seat| self.consult(seat, prompt.clone()))).await;
        let ideas: Vec<Idea> = self
            .seats
            .iter()
            .zip(answers)
            .map(|(seat, text)| Idea::new(&seat.persona.id, &seat.persona.name, text))
            .collect();

        meeting.ideas = ideas.clone();
        meeting.current_idea_index = 0;
        meeting.status = MeetingStatus::Analyzing;
        meeting.stage = DeliberationStage::Analysis;
        self.repository.save(&meeting).await?;
        info!(meeting_id, ideas = ideas.len(), "Ideas gathered");
        Ok(ideas)
    }

    /// Every member scores the idea at `index`.
    pub async fn analyze_idea(&self, meeting_id: &str, index: usize) -> Result<Idea> {
        let mut meeting = self.get_meeting(meeting_id).await?;
        let mut idea = meeting.idea(index)?.clone();

        let prompt = Prompt::new(self.prompts.critique(&idea)?)
            .with_context(self.prompts.ideas_context(&meeting)?);
        let answers = join_all(self.seats.iter().map(|seat| self.consult(seat, prompt.clone()))).await;
        let scores = self
            .seats
            .iter()
            .zip(answers)
            .map(|(seat, text)| Critique::parse(&text).into_score(&seat.persona))
            .collect();
        idea.record_scores(scores);

        meeting.ideas[index] = idea.clone();
        meeting.current_idea_index = index + 1;
        self.repository.save(&meeting).await?;
        info!(
            meeting_id,
            index,
            persona = %idea.persona_id,
            average = idea.average_score,
            "Idea analyzed"
        );
        Ok(idea)
    }

    /// Picks the best-scored idea and has the chair and the scholar write
    /// the final report.
    pub async fn finalize(&self, meeting_id: &str) -> Result<FinalReport> {
        let mut meeting = self.get_meeting(meeting_id).await?;
        let winner = meeting
            .winning_idea()
            .cloned()
            .ok_or_else(|| ParliamentError::validation("meeting has no ideas to finalize"))?;

        let context = self.prompts.verdict_context(&meeting, &winner)?;
        let chair = &self.seats[self.mediator];
        let scholar = &self.seats[self.scholar];
        let plan_prompt =
            Prompt::new(self.prompts.implementation_plan(&chair.persona.name)?).with_context(&context);
        let questions_prompt = Prompt::new(self.prompts.follow_up()).with_context(&context);
        let (implementation_plan, follow_up_questions) = futures::join!(
            self.consult(chair, plan_prompt),
            self.consult(scholar, questions_prompt)
        );

        let report = FinalReport {
            final_score: winner.average_score,
            winning_idea: winner,
            implementation_plan,
            follow_up_questions,
            total_ideas_evaluated: meeting.ideas.len(),
            generated_at: Utc::now(),
        };
        meeting.final_report = Some(report.clone());
        meeting.status = MeetingStatus::Completed;
        meeting.stage = DeliberationStage::Completed;
        self.repository.save(&meeting).await?;
        info!(
            meeting_id,
            winner = %report.winning_idea.persona_id,
            score = report.final_score,
            "Meeting finalized"
        );
        Ok(report)
    }

    pub async fn final_report(&self, meeting_id: &str) -> Result<FinalReport> {
        self.get_meeting(meeting_id)
            .await?
            .final_report
            .ok_or_else(|| ParliamentError::NotFinalized(meeting_id.to_string()))
    }

    async fn consult(&self, seat: &Seat, prompt: Prompt) -> String {
        match seat.agent.execute(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(persona = %seat.persona.id, error = %e, "Agent failed");
                disturbance(&seat.persona, &e)
            }
        }
    }
}

/// The text a seat contributes when its agent fails.
pub fn disturbance(persona: &Persona, error: &dyn std::fmt::Display) -> String {
    format!("[{} experienced a mystical disturbance: {error}]", persona.name)
}

#[async_trait]
impl CouncilBackend for DeliberationService {
    async fn create_meeting(&self, request: MeetingRequest) -> Result<Meeting> {
        DeliberationService::create_meeting(self, request).await
    }

    async fn get_meeting(&self, meeting_id: &str) -> Result<Meeting> {
        DeliberationService::get_meeting(self, meeting_id).await
    }

    async fn start_deliberation(&self, meeting_id: &str) -> Result<Vec<Idea>> {
        DeliberationService::start_deliberation(self, meeting_id).await
    }

    async fn analyze_idea(&self, meeting_id: &str, index: usize) -> Result<Idea> {
        DeliberationService::analyze_idea(self, meeting_id, index).await
    }

    async fn finalize(&self, meeting_id: &str) -> Result<FinalReport> {
        DeliberationService::finalize(self, meeting_id).await
    }

    async fn final_report(&self, meeting_id: &str) -> Result<FinalReport> {
        DeliberationService::final_report(self, meeting_id).await
    }
}
