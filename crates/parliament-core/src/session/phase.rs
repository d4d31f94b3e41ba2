//! Session phases.
//!
//! `Phase` is the fixed parliamentary order a simulated session walks.
//! `DeliberationStage` is the coarser progress marker of a deliberation
//! driven through a council backend.

use super::message::MessageKind;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the five fixed stages of a simulated session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Opening,
    Discussion,
    Motion,
    Voting,
    Conclusion,
}

impl Phase {
    /// Every phase, in the order a session passes through them.
    pub const ORDER: [Phase; 5] = [
        Phase::Opening,
        Phase::Discussion,
        Phase::Motion,
        Phase::Voting,
        Phase::Conclusion,
    ];

    pub fn first() -> Self {
        Phase::Opening
    }

    /// The phase that follows this one; `None` after the conclusion.
    pub fn next(self) -> Option<Self> {
        match self {
            Phase::Opening => Some(Phase::Discussion),
            Phase::Discussion => Some(Phase::Motion),
            Phase::Motion => Some(Phase::Voting),
            Phase::Voting => Some(Phase::Conclusion),
            Phase::Conclusion => None,
        }
    }

    pub fn is_final(self) -> bool {
        self.next().is_none()
    }

    pub fn title(self) -> &'static str {
        match self {
            Phase::Opening => "Call to Order",
            Phase::Discussion => "Open Discussion",
            Phase::Motion => "Motion and Second",
            Phase::Voting => "Voting Process",
            Phase::Conclusion => "Adjournment",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Phase::Opening => {
                "The presiding officer calls the meeting to order and establishes quorum."
            }
            Phase::Discussion => "Members present their perspectives on the matter at hand.",
            Phase::Motion => "A formal motion is made and seconded to proceed with the decision.",
            Phase::Voting => "Members cast their votes according to parliamentary procedure.",
            Phase::Conclusion => {
                "The results are announced and the meeting is formally concluded."
            }
        }
    }

    /// The tag carried by messages emitted during this phase.
    pub fn message_kind(self) -> MessageKind {
        match self {
            Phase::Opening => MessageKind::System,
            Phase::Discussion => MessageKind::Discussion,
            Phase::Motion => MessageKind::Motion,
            Phase::Voting => MessageKind::Voting,
            Phase::Conclusion => MessageKind::Conclusion,
        }
    }
}

/// Progress marker of a backend-driven deliberation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeliberationStage {
    Creating,
    Inspiration,
    Analysis,
    Finalization,
    Completed,
}

impl DeliberationStage {
    pub fn icon(self) -> &'static str {
        match self {
            DeliberationStage::Creating => "🏗️",
            DeliberationStage::Inspiration => "💡",
            DeliberationStage::Analysis => "🔍",
            DeliberationStage::Finalization => "⚖️",
            DeliberationStage::Completed => "✅",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DeliberationStage::Creating => "Convening Parliament",
            DeliberationStage::Inspiration => "Gathering Ideas",
            DeliberationStage::Analysis => "Sacred Analysis",
            DeliberationStage::Finalization => "Final Deliberation",
            DeliberationStage::Completed => "Session Complete",
        }
    }
}
