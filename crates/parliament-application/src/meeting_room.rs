//! Meeting room driver.
//!
//! Steps a `CouncilBackend` through creating, inspiration, analysis and
//! finalization, narrating every step into a chat transcript and tracking
//! a progress percentage. The first backend error ends the run: it is
//! logged, surfaced as one error message and returned, with no retry.

use parliament_core::config::DeliberationConfig;
use parliament_core::error::{ParliamentError, Result};
use parliament_core::meeting::{CouncilBackend, FinalReport, MeetingRequest};
use parliament_core::persona::{PersonaCatalog, observer_seats};
use parliament_core::session::{DeliberationStage, Message, MessageKind, SessionEvent, Transcript};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{error, info};

const SYSTEM_SPEAKER: &str = "System";
const ACKNOWLEDGMENT: &str = "The council acknowledges your input, mortal observer.";

/// A point-in-time view of the room.
#[derive(Debug, Clone)]
pub struct RoomSnapshot {
    pub meeting_id: Option<String>,
    pub stage: DeliberationStage,
    pub progress: u8,
    pub transcript: Transcript,
}

struct RoomState {
    meeting_id: Option<String>,
    stage: DeliberationStage,
    progress: u8,
    transcript: Transcript,
}

pub struct MeetingRoom {
    backend: Arc<dyn CouncilBackend>,
    chair: String,
    questioner: String,
    config: DeliberationConfig,
    state: Mutex<RoomState>,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl MeetingRoom {
    pub fn new(
        backend: Arc<dyn CouncilBackend>,
        catalog: &PersonaCatalog,
        config: DeliberationConfig,
    ) -> Self {
        let questioner = observer_seats()
            .into_iter()
            .find(|seat| seat.can_participate)
            .map(|seat| seat.name)
            .unwrap_or_else(|| "The Questioner".to_string());
        Self {
            backend,
            chair: catalog.mediator().name.clone(),
            questioner,
            config,
            state: Mutex::new(RoomState {
                meeting_id: None,
                stage: DeliberationStage::Creating,
                progress: 0,
                transcript: Transcript::new(),
            }),
            events: None,
        }
    }

    pub fn with_events(mut self, sender: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    pub async fn snapshot(&self) -> RoomSnapshot {
        let state = self.state.lock().await;
        RoomSnapshot {
            meeting_id: state.meeting_id.clone(),
            stage: state.stage,
            progress: state.progress,
            transcript: state.transcript.clone(),
        }
    }

    /// Holds a full deliberation on `request` and returns the final report.
    pub async fn run(&self, request: MeetingRequest) -> Result<FinalReport> {
        self.system(
            "🏛️ The Parliamentarium is now in session. Initializing sacred discourse...",
            MessageKind::System,
        )
        .await;

        let meeting = match self.backend.create_meeting(request).await {
            Ok(meeting) => meeting,
            Err(e) => return Err(self.fail("Failed to convene the parliament", e).await),
        };
        self.state.lock().await.meeting_id = Some(meeting.id.clone());
        info!(meeting_id = %meeting.id, topic = %meeting.topic, "Meeting room opened");

        self.advance(DeliberationStage::Inspiration, 10).await;
        self.chair_says(
            "🔮 Gathering inspiration from all council members...",
            MessageKind::System,
        )
        .await;
        let ideas = match self.backend.start_deliberation(&meeting.id).await {
            Ok(ideas) => ideas,
            Err(e) => return Err(self.fail("Failed to gather council wisdom", e).await),
        };
        self.chair_says(
            &format!(
                "✨ {} unique ideas have been gathered from the council. Now begins the sacred analysis...",
                ideas.len()
            ),
            MessageKind::System,
        )
        .await;
        self.advance(DeliberationStage::Analysis, 25).await;

        let total = ideas.len();
        for (index, idea) in ideas.iter().enumerate() {
            self.chair_says(
                &format!(
                    "🔍 Now analyzing: \"{}\" (proposed by {})",
                    idea.idea, idea.persona_name
                ),
                MessageKind::Motion,
            )
            .await;

            let analyzed = match self.backend.analyze_idea(&meeting.id, index).await {
                Ok(analyzed) => analyzed,
                Err(e) => return Err(self.fail("Error during analysis phase", e).await),
            };
            self.chair_says(
                &format!(
                    "📊 Analysis complete! Average score: {}/10",
                    analyzed.average_score
                ),
                MessageKind::Voting,
            )
            .await;
            for score in analyzed.scores.iter().take(self.config.sample_responses) {
                self.append(Message::new(
                    &score.persona_name,
                    format!("{} (Score: {}/10)", score.analysis, score.score),
                    MessageKind::Discussion,
                ))
                .await;
            }

            self.advance(DeliberationStage::Analysis, analysis_progress(index, total))
                .await;
            if index + 1 < total {
                tokio::time::sleep(self.config.analysis_pause()).await;
            }
        }

        self.advance(DeliberationStage::Finalization, 80).await;
        self.chair_says(
            "⚖️ Selecting the champion idea and preparing final report...",
            MessageKind::System,
        )
        .await;
        let report = match self.backend.finalize(&meeting.id).await {
            Ok(report) => report,
            Err(e) => return Err(self.fail("Error during finalization", e).await),
        };
        let winner = &report.winning_idea;
        self.chair_says(
            &format!(
                "🏆 The council has spoken! Winner: \"{}\" ({}) - Score: {}/10",
                winner.idea, winner.persona_name, winner.average_score
            ),
            MessageKind::Conclusion,
        )
        .await;
        self.advance(DeliberationStage::Completed, 100).await;
        info!(meeting_id = %meeting.id, score = report.final_score, "Meeting room closed");

        Ok(report)
    }

    /// The questioner speaks; the chair acknowledges after a short delay.
    ///
    /// Returns `false` and records nothing for blank input.
    pub async fn speak(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.append(Message::new(&self.questioner, text, MessageKind::User))
            .await;
        tokio::time::sleep(self.config.acknowledgment_delay()).await;
        self.chair_says(ACKNOWLEDGMENT, MessageKind::Response).await;
        true
    }

    async fn fail(&self, what: &str, e: ParliamentError) -> ParliamentError {
        let stage = self.state.lock().await.stage;
        error!(stage = %stage, error = %e, "{what}");
        self.append(Message::new(
            SYSTEM_SPEAKER,
            format!("❌ {what}. Please try again."),
            MessageKind::Error,
        ))
        .await;
        e
    }

    async fn advance(&self, stage: DeliberationStage, progress: u8) {
        {
            let mut state = self.state.lock().await;
            state.stage = stage;
            state.progress = progress;
        }
        self.publish(SessionEvent::StageChanged { stage, progress });
    }

    async fn system(&self, content: &str, kind: MessageKind) {
        self.append(Message::new(SYSTEM_SPEAKER, content, kind)).await;
    }

    async fn chair_says(&self, content: &str, kind: MessageKind) {
        self.append(Message::new(&self.chair, content, kind)).await;
    }

    async fn append(&self, message: Message) {
        self.state.lock().await.transcript.append(message.clone());
        self.publish(SessionEvent::MessageAppended { message });
    }

    fn publish(&self, event: SessionEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}

/// Analysis spans 25..=75 percent, split evenly across ideas.
fn analysis_progress(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 75;
    }
    (25 + (index + 1) * 50 / total) as u8
}
