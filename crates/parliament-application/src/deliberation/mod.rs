//! Agent-backed deliberation.
//!
//! # Module Structure
//!
//! - `service`: `DeliberationService`, the in-process `CouncilBackend`
//! - `prompts`: minijinja prompt templates
//! - `scoring`: parsing of `ANALYSIS / SCORE / REASONING` critiques

mod prompts;
mod scoring;
mod service;

pub use prompts::PromptBook;
pub use scoring::Critique;
pub use service::{DeliberationService, disturbance};
