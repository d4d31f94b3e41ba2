//! Session domain module.
//!
//! # Module Structure
//!
//! - `message`: chat message types (`Message`, `MessageKind`)
//! - `transcript`: the append-only `Transcript`
//! - `phase`: the fixed session phases and deliberation stages
//! - `event`: progress events published to observers

mod event;
mod message;
mod phase;
mod transcript;

// Re-export public API
pub use event::SessionEvent;
pub use message::{Message, MessageKind};
pub use phase::{DeliberationStage, Phase};
pub use transcript::Transcript;
