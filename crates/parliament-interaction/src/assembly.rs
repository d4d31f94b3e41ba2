//! Seats one agent per council member.
//!
//! Gemini keys are spread round-robin across the seats. Without Gemini
//! keys every seat goes to OpenRouter, and without any credentials (or
//! when asked to stay offline) every seat gets a scripted agent.

use parliament_core::agent::CouncilAgent;
use parliament_core::config::SecretConfig;
use parliament_core::persona::PersonaCatalog;
use std::sync::Arc;
use strum::Display;
use tracing::{info, warn};

use crate::gemini_api_agent::GeminiApiAgent;
use crate::openrouter_api_agent::OpenRouterApiAgent;
use crate::persona_agent::PersonaAgent;
use crate::scripted_agent::ScriptedAgent;

/// Which provider backs a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SeatBackend {
    Gemini,
    OpenRouter,
    Scripted,
}

/// The agents of a council, in seating order.
pub struct CouncilAssembly {
    agents: Vec<Arc<dyn CouncilAgent>>,
    backends: Vec<SeatBackend>,
}

impl CouncilAssembly {
    /// Seats the council from the configured credentials.
    pub fn from_secrets(catalog: &PersonaCatalog, secrets: &SecretConfig, offline: bool) -> Self {
        if offline || secrets.is_empty() {
            if !offline {
                warn!("No API credentials configured; seating scripted agents");
            }
            return Self::scripted(catalog);
        }

        let mut agents: Vec<Arc<dyn CouncilAgent>> = Vec::with_capacity(catalog.len());
        let mut backends = Vec::with_capacity(catalog.len());
        for (seat, persona) in catalog.iter().enumerate() {
            let gemini = secrets
                .gemini
                .as_ref()
                .and_then(|config| GeminiApiAgent::for_seat(config, seat));

            if let Some(gemini) = gemini {
                agents.push(Arc::new(PersonaAgent::new(gemini, persona.clone())));
                backends.push(SeatBackend::Gemini);
            } else if let Some(config) = &secrets.openrouter {
                let agent = OpenRouterApiAgent::from_config(config);
                agents.push(Arc::new(PersonaAgent::new(agent, persona.clone())));
                backends.push(SeatBackend::OpenRouter);
            } else {
                agents.push(Arc::new(ScriptedAgent::new(persona)));
                backends.push(SeatBackend::Scripted);
            }
        }

        let assembly = Self { agents, backends };
        info!(
            gemini = assembly.count(SeatBackend::Gemini),
            openrouter = assembly.count(SeatBackend::OpenRouter),
            scripted = assembly.count(SeatBackend::Scripted),
            "Council seated"
        );
        assembly
    }

    /// Scripted agents in every seat.
    pub fn scripted(catalog: &PersonaCatalog) -> Self {
        Self {
            agents: catalog
                .iter()
                .map(|persona| Arc::new(ScriptedAgent::new(persona)) as Arc<dyn CouncilAgent>)
                .collect(),
            backends: vec![SeatBackend::Scripted; catalog.len()],
        }
    }

    pub fn count(&self, backend: SeatBackend) -> usize {
        self.backends.iter().filter(|b| **b == backend).count()
    }

    pub fn into_agents(self) -> Vec<Arc<dyn CouncilAgent>> {
        self.agents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parliament_core::config::{GeminiConfig, OpenRouterConfig};

    #[test]
    fn test_offline_is_all_scripted() {
        let catalog = PersonaCatalog::council();
        let secrets = SecretConfig {
            gemini: Some(GeminiConfig {
                api_keys: vec!["k".into()],
                model_name: None,
            }),
            openrouter: None,
        };
        let assembly = CouncilAssembly::from_secrets(&catalog, &secrets, true);
        assert_eq!(assembly.count(SeatBackend::Scripted), catalog.len());
        assert_eq!(assembly.into_agents().len(), catalog.len());
    }

    #[test]
    fn test_no_credentials_falls_back_to_scripted() {
        let catalog = PersonaCatalog::council();
        let assembly = CouncilAssembly::from_secrets(&catalog, &SecretConfig::default(), false);
        assert_eq!(assembly.count(SeatBackend::Scripted), catalog.len());
    }

    #[test]
    fn test_gemini_preferred_over_openrouter() {
        let catalog = PersonaCatalog::council();
        let secrets = SecretConfig {
            gemini: Some(GeminiConfig {
                api_keys: vec!["a".into(), "b".into()],
                model_name: None,
            }),
            openrouter: Some(OpenRouterConfig {
                api_key: "or".into(),
                model_name: None,
            }),
        };
        let assembly = CouncilAssembly::from_secrets(&catalog, &secrets, false);
        assert_eq!(assembly.count(SeatBackend::Gemini), catalog.len());
        assert_eq!(SeatBackend::OpenRouter.to_string(), "openrouter");
    }

    #[test]
    fn test_openrouter_only() {
        let catalog = PersonaCatalog::council();
        let secrets = SecretConfig {
            gemini: None,
            openrouter: Some(OpenRouterConfig {
                api_key: "or".into(),
                model_name: None,
            }),
        };
        let assembly = CouncilAssembly::from_secrets(&catalog, &secrets, false);
        assert_eq!(assembly.count(SeatBackend::OpenRouter), catalog.len());
    }
}
