//! Phase sequencer for simulated sessions.
//!
//! Walks a topic through opening, discussion, motion, voting and
//! conclusion, emitting scripted messages on a fixed timeline. Every
//! emission waits on a timer that races the session's cancellation token,
//! so a cancelled session stops before its next scheduled message and
//! returns the transcript built so far.

use parliament_core::config::SimulationConfig;
use parliament_core::error::{ParliamentError, Result};
use parliament_core::persona::{Persona, PersonaCatalog};
use parliament_core::session::{Message, Phase, SessionEvent, Transcript};
use parliament_core::tally::VoteTally;
use parliament_core::topic::Topic;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::scripts::ScriptBook;
use super::voting::cast_votes;

/// How a simulated session ended.
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    /// Every phase ran once, in order.
    Adjourned {
        transcript: Transcript,
        tally: VoteTally,
        phases: Vec<Phase>,
    },
    /// Cancelled before the conclusion. `reached` is the last phase entered.
    Abandoned {
        reached: Option<Phase>,
        transcript: Transcript,
    },
}

impl SessionOutcome {
    pub fn transcript(&self) -> &Transcript {
        match self {
            SessionOutcome::Adjourned { transcript, .. } => transcript,
            SessionOutcome::Abandoned { transcript, .. } => transcript,
        }
    }

    pub fn tally(&self) -> Option<&VoteTally> {
        match self {
            SessionOutcome::Adjourned { tally, .. } => Some(tally),
            SessionOutcome::Abandoned { .. } => None,
        }
    }

    pub fn is_adjourned(&self) -> bool {
        matches!(self, SessionOutcome::Adjourned { .. })
    }

    /// The vote tally of an adjourned session; `Cancelled` otherwise.
    pub fn into_tally(self) -> Result<VoteTally> {
        match self {
            SessionOutcome::Adjourned { tally, .. } => Ok(tally),
            SessionOutcome::Abandoned { reached, .. } => Err(ParliamentError::Cancelled(
                reached.map_or_else(|| "the call to order".to_string(), |p| p.to_string()),
            )),
        }
    }
}

/// Drives one simulated session.
pub struct PhaseSequencer {
    catalog: PersonaCatalog,
    config: SimulationConfig,
    scripts: ScriptBook,
    rng: StdRng,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl PhaseSequencer {
    pub fn new(catalog: PersonaCatalog, config: SimulationConfig) -> Self {
        Self {
            catalog,
            config,
            scripts: ScriptBook::new(),
            rng: StdRng::from_entropy(),
            events: None,
        }
    }

    /// Fixes the random source so line choice and votes are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Publishes progress to `sender`. A dropped receiver is ignored.
    pub fn with_events(mut self, sender: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Creates an event channel for this sequencer and returns its receiver.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    /// Runs the session until it adjourns or `cancel` fires.
    pub async fn run(mut self, topic: &Topic, cancel: CancellationToken) -> SessionOutcome {
        let mut run = SessionRun::new(self.events.take(), cancel);
        info!(
            topic = topic.text(),
            proposer = topic.proposer(),
            members = self.catalog.len(),
            "Convening simulated session"
        );

        match self.drive(topic, &mut run).await {
            Some(tally) => {
                run.publish(SessionEvent::Adjourned);
                info!(summary = %tally.summary(), carried = tally.carried(), "Session adjourned");
                SessionOutcome::Adjourned {
                    transcript: run.transcript,
                    tally,
                    phases: run.phases,
                }
            }
            None => {
                let reached = run.phases.last().copied();
                run.publish(SessionEvent::Abandoned { reached });
                info!(reached = ?reached, messages = run.transcript.len(), "Session abandoned");
                SessionOutcome::Abandoned {
                    reached,
                    transcript: run.transcript,
                }
            }
        }
    }

    /// Convenience for callers that never cancel.
    pub async fn run_to_completion(self, topic: &Topic) -> SessionOutcome {
        self.run(topic, CancellationToken::new()).await
    }

    // Returns `None` as soon as a wait is cancelled.
    async fn drive(&mut self, topic: &Topic, run: &mut SessionRun) -> Option<VoteTally> {
        let chair = self.catalog.mediator().clone();
        let dissenter = self.catalog.dissenter().clone();

        run.wait(self.config.opening_delay()).await?;
        run.enter(Phase::Opening);
        let call = self.line(self.scripts.call_to_order(topic), topic.text());
        run.say(speak(&chair, call, Phase::Opening));

        run.wait(self.config.discussion_lead_in()).await?;
        run.enter(Phase::Discussion);
        for (seat, persona) in self.catalog.iter().enumerate() {
            if seat > 0 {
                run.wait(self.config.discussion_stagger()).await?;
            }
            let line = self.scripts.discussion_line(persona, topic, &mut self.rng);
            let line = self.line(line, topic.text());
            debug!(persona = %persona.id, "Member speaks");
            run.say(speak(persona, line, Phase::Discussion));
        }

        run.wait(self.config.motion_delay()).await?;
        run.enter(Phase::Motion);
        let motion = self.line(self.scripts.motion(topic), topic.text());
        run.say(speak(&chair, motion, Phase::Motion));
        run.say(speak(&dissenter, self.scripts.second(), Phase::Motion));

        run.wait(self.config.voting_delay()).await?;
        run.enter(Phase::Voting);
        let tally = cast_votes(&self.catalog, self.config.aye_odds(), &mut self.rng);
        run.publish(SessionEvent::TallyRecorded {
            tally: tally.clone(),
        });
        let announcement = self.line(self.scripts.tally_announcement(&tally), &tally.summary());
        run.say(speak(&chair, announcement, Phase::Voting));

        run.wait(self.config.conclusion_delay()).await?;
        run.enter(Phase::Conclusion);
        let verdict = self.line(self.scripts.verdict(topic, tally.carried()), topic.text());
        run.say(speak(&chair, verdict, Phase::Conclusion));

        Some(tally)
    }

    // Scripts are static templates; a render failure degrades to the fallback text.
    fn line(&self, rendered: parliament_core::Result<String>, fallback: &str) -> String {
        rendered.unwrap_or_else(|e| {
            warn!(error = %e, "Script rendering failed");
            fallback.to_string()
        })
    }
}

fn speak(persona: &Persona, content: String, phase: Phase) -> Message {
    Message::new(&persona.name, content, phase.message_kind()).with_role(&persona.role)
}

/// Mutable state of one run: the transcript, the phases entered so far and
/// the outbound event channel.
struct SessionRun {
    transcript: Transcript,
    phases: Vec<Phase>,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
    cancel: CancellationToken,
}

impl SessionRun {
    fn new(events: Option<mpsc::UnboundedSender<SessionEvent>>, cancel: CancellationToken) -> Self {
        Self {
            transcript: Transcript::new(),
            phases: Vec::with_capacity(Phase::ORDER.len()),
            events,
            cancel,
        }
    }

    /// Sleeps for `delay`; `None` if the session was cancelled first.
    async fn wait(&self, delay: Duration) -> Option<()> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            _ = tokio::time::sleep(delay) => Some(()),
        }
    }

    fn enter(&mut self, phase: Phase) {
        self.phases.push(phase);
        info!(phase = %phase, title = phase.title(), "Phase started");
        self.publish(SessionEvent::PhaseStarted { phase });
    }

    fn say(&mut self, message: Message) {
        self.transcript.append(message.clone());
        self.publish(SessionEvent::MessageAppended { message });
    }

    fn publish(&self, event: SessionEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}
