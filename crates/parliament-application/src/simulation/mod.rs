//! Local session simulation.
//!
//! # Module Structure
//!
//! - `sequencer`: the cancellable five-phase `PhaseSequencer`
//! - `scripts`: scripted lines per temperament and for the chair
//! - `voting`: the one-shot random tally

mod scripts;
mod sequencer;
mod voting;

pub use scripts::ScriptBook;
pub use sequencer::{PhaseSequencer, SessionOutcome};
pub use voting::cast_votes;
