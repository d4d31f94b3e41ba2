//! The council backend seam.

use super::model::{FinalReport, Idea, Meeting, MeetingRequest};
use crate::error::Result;
use async_trait::async_trait;

/// Something that can hold a deliberation: the in-process deliberation
/// service or a remote council reached over HTTP.
///
/// Each call is one step of the inspiration / analysis / finalization
/// flow; the caller decides the order and pacing.
#[async_trait]
pub trait CouncilBackend: Send + Sync {
    /// Convenes a new meeting.
    async fn create_meeting(&self, request: MeetingRequest) -> Result<Meeting>;

    async fn get_meeting(&self, meeting_id: &str) -> Result<Meeting>;

    /// Gathers one idea from every council member, in catalog order.
    async fn start_deliberation(&self, meeting_id: &str) -> Result<Vec<Idea>>;

    /// Has every council member score the idea at `index`.
    async fn analyze_idea(&self, meeting_id: &str, index: usize) -> Result<Idea>;

    /// Picks the winning idea and writes the final report.
    async fn finalize(&self, meeting_id: &str) -> Result<FinalReport>;

    /// The stored report; `NotFinalized` until `finalize` has run.
    async fn final_report(&self, meeting_id: &str) -> Result<FinalReport>;
}
