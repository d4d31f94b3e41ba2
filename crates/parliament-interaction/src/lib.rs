//! Interaction layer for the Parliamentarium.
//!
//! Everything that talks to something outside the process: LLM agents
//! (Gemini, OpenRouter), the offline scripted agent, the persona wrapper
//! that gives an agent a council member's voice, and the HTTP client for
//! a remote council backend.

pub mod assembly;
mod http;
pub mod gemini_api_agent;
pub mod openrouter_api_agent;
pub mod persona_agent;
pub mod remote_client;
pub mod scripted_agent;

pub use assembly::{CouncilAssembly, SeatBackend};
pub use gemini_api_agent::GeminiApiAgent;
pub use openrouter_api_agent::OpenRouterApiAgent;
pub use persona_agent::PersonaAgent;
pub use remote_client::RemoteCouncilClient;
pub use scripted_agent::ScriptedAgent;
