//! Persona domain model.
//!
//! Represents the council members that speak, score and vote during a
//! session. Each persona carries display metadata only; how it is backed by
//! an LLM is decided by the interaction layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The speaking style of a persona.
///
/// Simulated sessions draw discussion lines from a pool keyed by
/// temperament.
#[derive(
    Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Temperament {
    Historical,
    Futuristic,
    Analytical,
    Contextual,
    Academic,
    Mystical,
    Contrarian,
    Artistic,
    Impulsive,
    Balanced,
    Ethical,
}

/// The decorative "model/provider" label shown next to a persona.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ModelLabel {
    /// Model name as displayed (e.g. "gpt-4o")
    pub llm: String,
    /// Provider name as displayed (e.g. "OpenAI")
    pub provider: String,
}

/// Decorative seat attributes.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SeatAttributes {
    /// Name of the persona's special seat ("highchair", "pool", ...)
    pub special_seat: String,
    /// Glow colour name
    pub glow: String,
    /// Whether the persona is highlighted as a top-tier model
    #[serde(default)]
    pub is_top_llm: bool,
    /// Portrait URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A council member.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Stable identifier ("mouse", "ego", ...)
    pub id: String,
    /// Display name ("The Mouse")
    pub name: String,
    /// Role label ("Historian")
    pub role: String,
    /// One-line description
    pub description: String,
    /// System prompt used when the persona is backed by an LLM
    pub system_prompt: String,
    /// Speaking style
    pub temperament: Temperament,
    /// Fictitious model/provider label
    pub model: ModelLabel,
    /// Seat decoration
    pub seat: SeatAttributes,
}

/// A non-voting seat in the chamber.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ObserverSeat {
    pub id: String,
    pub name: String,
    pub role: String,
    pub description: String,
    /// Whether the seat may post messages into a session
    pub can_participate: bool,
    pub glow: String,
}
