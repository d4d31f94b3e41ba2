use async_trait::async_trait;
use parliament_core::agent::{AgentError, CouncilAgent, Prompt};
use parliament_core::persona::Persona;
use std::sync::Arc;
use tokio::sync::Mutex;

/// How many past exchanges are replayed into each request.
const HISTORY_LIMIT: usize = 6;

/// Speaks as a council member: prefixes every request with the member's
/// charge and the recent dialogue, then records the exchange.
pub struct PersonaAgent<A: CouncilAgent> {
    inner_agent: A,
    pub persona: Persona,
    dialogue_history: Arc<Mutex<Vec<String>>>,
}

impl<A: CouncilAgent> PersonaAgent<A> {
    pub fn new(inner_agent: A, persona: Persona) -> Self {
        Self {
            inner_agent,
            persona,
            dialogue_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn history(&self) -> Vec<String> {
        self.dialogue_history.lock().await.clone()
    }

    fn profile(&self) -> String {
        format!(
            "# Persona Profile\n**Name**: {}\n**Role**: {}\n\n{}",
            self.persona.name, self.persona.role, self.persona.system_prompt
        )
    }
}

#[async_trait]
impl<A> CouncilAgent for PersonaAgent<A>
where
    A: CouncilAgent,
{
    fn expertise(&self) -> &str {
        &self.persona.role
    }

    async fn execute(&self, prompt: Prompt) -> Result<String, AgentError> {
        let history_prompt = {
            let history = self.dialogue_history.lock().await;
            history.join("\n")
        };

        let mut context = self.profile();
        if !history_prompt.is_empty() {
            context.push_str("\n\n# Conversation History\n");
            context.push_str(&history_prompt);
        }
        if !prompt.context.trim().is_empty() {
            context.push_str("\n\n");
            context.push_str(&prompt.context);
        }

        let request = prompt.message.clone();
        let response = self
            .inner_agent
            .execute(Prompt::new(prompt.message).with_context(context))
            .await?;

        let mut history = self.dialogue_history.lock().await;
        history.push(format!("Request: {request}\n{}: {response}", self.persona.name));
        let overflow = history.len().saturating_sub(HISTORY_LIMIT);
        history.drain(..overflow);

        Ok(response)
    }
}
