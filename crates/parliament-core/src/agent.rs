//! Council agent abstraction.
//!
//! A council agent turns a prompt into free text. The interaction crate
//! provides HTTP-backed and scripted implementations; the application layer
//! only ever sees this trait.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure modes of a council agent call.
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    /// The agent could not build or run the request.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The provider answered with a failure status.
    #[error("Process error (status: {status_code:?}): {message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// Anything else (unparseable responses, ...).
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Nothing in the council retries today; the flag is carried so callers
    /// can log it.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AgentError::ProcessError {
                is_retryable: true,
                ..
            }
        )
    }
}

/// A prompt addressed to a single council agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Context preamble (topic, other ideas, ...). May be empty.
    pub context: String,
    /// The request itself.
    pub message: String,
}

impl Prompt {
    /// Prompt without context.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            context: String::new(),
            message: message.into(),
        }
    }

    /// Attaches a context preamble.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Flattens the prompt into a single text body.
    pub fn to_text(&self) -> String {
        if self.context.trim().is_empty() {
            self.message.clone()
        } else {
            format!("Context: {}\n\n{}", self.context, self.message)
        }
    }
}

/// An agent able to answer on behalf of a council member.
#[async_trait]
pub trait CouncilAgent: Send + Sync {
    /// Short description of what the agent is backed by.
    fn expertise(&self) -> &str;

    /// Runs the prompt and returns the agent's text answer.
    async fn execute(&self, prompt: Prompt) -> Result<String, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_without_context_is_the_message() {
        let prompt = Prompt::new("Provide ONE idea");
        assert_eq!(prompt.to_text(), "Provide ONE idea");
    }

    #[test]
    fn prompt_with_context_prefixes_it() {
        let prompt = Prompt::new("Rate it").with_context("Topic: transit");
        assert_eq!(prompt.to_text(), "Context: Topic: transit\n\nRate it");
    }

    #[test]
    fn only_flagged_process_errors_are_retryable() {
        let err = AgentError::ProcessError {
            status_code: Some(503),
            message: "unavailable".into(),
            is_retryable: true,
            retry_after: None,
        };
        assert!(err.is_retryable());
        assert!(!AgentError::Other("bad json".into()).is_retryable());
    }
}
