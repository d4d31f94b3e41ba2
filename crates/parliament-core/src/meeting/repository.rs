//! Meeting repository trait.
//!
//! Defines the interface for meeting persistence operations.

use super::model::Meeting;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for persisting meetings.
///
/// Decouples the deliberation service from the storage mechanism
/// (in-memory map, JSON directory, ...).
#[async_trait]
pub trait MeetingRepository: Send + Sync {
    /// Finds a meeting by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Meeting))`: Meeting found
    /// - `Ok(None)`: Meeting not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, meeting_id: &str) -> Result<Option<Meeting>>;

    /// Saves a meeting, replacing any stored meeting with the same ID.
    async fn save(&self, meeting: &Meeting) -> Result<()>;

    /// Lists all stored meetings, oldest first.
    async fn list_all(&self) -> Result<Vec<Meeting>>;
}
