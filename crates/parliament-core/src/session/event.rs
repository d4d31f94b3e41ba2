//! Session events published to observers.

use serde::{Deserialize, Serialize};

use super::{DeliberationStage, Message, Phase};
use crate::tally::VoteTally;

/// Progress events published while a session runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A simulated session entered a phase.
    PhaseStarted { phase: Phase },
    /// A deliberation moved to a new stage.
    StageChanged {
        stage: DeliberationStage,
        progress: u8,
    },
    /// A message was appended to the transcript.
    MessageAppended { message: Message },
    /// The one-shot tally was recorded.
    TallyRecorded { tally: VoteTally },
    /// The session ran to completion.
    Adjourned,
    /// The session was cancelled; `reached` is the last phase entered.
    Abandoned {
        #[serde(default)]
        reached: Option<Phase>,
    },
}
