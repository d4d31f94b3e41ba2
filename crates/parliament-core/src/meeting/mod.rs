//! Meeting domain module.
//!
//! A meeting is one deliberation over a topic: every council member
//! proposes an idea, the council scores each idea, and the best one is
//! written up in a final report.

mod backend;
mod model;
mod repository;

pub use backend::CouncilBackend;
pub use model::{
    DEFAULT_SCORE, FinalReport, Idea, MAX_SCORE, MIN_SCORE, Meeting, MeetingRequest,
    MeetingStatus, PersonaScore,
};
pub use repository::MeetingRepository;
