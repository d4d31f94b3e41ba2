//! Domain layer for the Parliamentarium.
//!
//! Holds the council's persona catalog, topics, transcripts, phases, vote
//! tallies and the meeting model shared by every other crate. Nothing in
//! here performs I/O; storage, LLM access and scheduling live in the
//! infrastructure, interaction and application crates.

pub mod agent;
pub mod cache;
pub mod config;
pub mod error;
pub mod meeting;
pub mod persona;
pub mod session;
pub mod tally;
pub mod timestamp;
pub mod topic;

// Re-export common error type
pub use error::{ParliamentError, Result};
