//! Application layer for the Parliamentarium.
//!
//! This crate provides the use cases that coordinate the domain types:
//! the local phase simulation, the agent-backed deliberation service and
//! the meeting room that drives any council backend.

pub mod deliberation;
pub mod meeting_room;
pub mod simulation;

pub use deliberation::DeliberationService;
pub use meeting_room::{MeetingRoom, RoomSnapshot};
pub use simulation::{PhaseSequencer, SessionOutcome};
