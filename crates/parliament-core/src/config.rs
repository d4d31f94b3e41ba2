//! Configuration types.
//!
//! `RootConfig` is read from `config.toml`; every section and field has a
//! default so a partial (or missing) file is valid. `SecretConfig` holds
//! API credentials and comes from `secret.json` or the environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    pub simulation: SimulationConfig,
    pub deliberation: DeliberationConfig,
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
}

/// Pacing and vote odds of the local session simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub opening_delay_ms: u64,
    pub discussion_lead_in_ms: u64,
    pub discussion_stagger_ms: u64,
    pub motion_delay_ms: u64,
    pub voting_delay_ms: u64,
    pub conclusion_delay_ms: u64,
    /// Chance that each member votes aye.
    pub aye_probability: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            opening_delay_ms: 1000,
            discussion_lead_in_ms: 2000,
            discussion_stagger_ms: 3000,
            motion_delay_ms: 2000,
            voting_delay_ms: 2000,
            conclusion_delay_ms: 3000,
            aye_probability: 0.7,
        }
    }
}

impl SimulationConfig {
    /// All delays divided by `speed`. Non-positive speeds leave the pacing unchanged.
    pub fn scaled(&self, speed: f64) -> Self {
        if speed.is_nan() || speed <= 0.0 {
            return self.clone();
        }
        let scale = |ms: u64| (ms as f64 / speed).round() as u64;
        Self {
            opening_delay_ms: scale(self.opening_delay_ms),
            discussion_lead_in_ms: scale(self.discussion_lead_in_ms),
            discussion_stagger_ms: scale(self.discussion_stagger_ms),
            motion_delay_ms: scale(self.motion_delay_ms),
            voting_delay_ms: scale(self.voting_delay_ms),
            conclusion_delay_ms: scale(self.conclusion_delay_ms),
            aye_probability: self.aye_probability,
        }
    }

    /// `aye_probability` clamped into `0.0..=1.0`.
    pub fn aye_odds(&self) -> f64 {
        if self.aye_probability.is_nan() {
            return 0.0;
        }
        self.aye_probability.clamp(0.0, 1.0)
    }

    pub fn opening_delay(&self) -> Duration {
        Duration::from_millis(self.opening_delay_ms)
    }

    pub fn discussion_lead_in(&self) -> Duration {
        Duration::from_millis(self.discussion_lead_in_ms)
    }

    pub fn discussion_stagger(&self) -> Duration {
        Duration::from_millis(self.discussion_stagger_ms)
    }

    pub fn motion_delay(&self) -> Duration {
        Duration::from_millis(self.motion_delay_ms)
    }

    pub fn voting_delay(&self) -> Duration {
        Duration::from_millis(self.voting_delay_ms)
    }

    pub fn conclusion_delay(&self) -> Duration {
        Duration::from_millis(self.conclusion_delay_ms)
    }
}

/// Pacing of the backend-driven meeting room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliberationConfig {
    /// Pause between two idea analyses.
    pub analysis_pause_ms: u64,
    /// Delay before the chair acknowledges the questioner.
    pub acknowledgment_delay_ms: u64,
    /// How many critiques per idea are echoed into the chat.
    pub sample_responses: usize,
}

impl Default for DeliberationConfig {
    fn default() -> Self {
        Self {
            analysis_pause_ms: 1000,
            acknowledgment_delay_ms: 1000,
            sample_responses: 3,
        }
    }
}

impl DeliberationConfig {
    pub fn analysis_pause(&self) -> Duration {
        Duration::from_millis(self.analysis_pause_ms)
    }

    pub fn acknowledgment_delay(&self) -> Duration {
        Duration::from_millis(self.acknowledgment_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of a remote council, e.g. `http://localhost:8001`.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            // Deliberation steps fan out to every council member.
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Also write a daily-rolling log file under the logs directory.
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: false,
        }
    }
}

/// API credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
    #[serde(default)]
    pub openrouter: Option<OpenRouterConfig>,
}

impl SecretConfig {
    pub fn is_empty(&self) -> bool {
        self.gemini.as_ref().is_none_or(|g| g.api_keys.is_empty())
            && self.openrouter.is_none()
    }
}

/// Gemini API configuration. Several keys are spread across seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_keys: Vec<String>,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// OpenRouter API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: RootConfig = toml::from_str(
            r#"
            [simulation]
            aye_probability = 0.5

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.aye_probability, 0.5);
        assert_eq!(config.simulation.opening_delay_ms, 1000);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.deliberation, DeliberationConfig::default());
    }

    #[test]
    fn test_scaled_divides_delays() {
        let fast = SimulationConfig::default().scaled(10.0);
        assert_eq!(fast.discussion_stagger_ms, 300);
        assert_eq!(fast.aye_probability, 0.7);
        assert_eq!(SimulationConfig::default().scaled(0.0), SimulationConfig::default());
    }

    #[test]
    fn test_aye_odds_clamped() {
        let config = SimulationConfig {
            aye_probability: 1.5,
            ..Default::default()
        };
        assert_eq!(config.aye_odds(), 1.0);
    }

    #[test]
    fn test_secret_is_empty() {
        assert!(SecretConfig::default().is_empty());
        let secret: SecretConfig =
            serde_json::from_str(r#"{"gemini":{"api_keys":["k1","k2"]}}"#).unwrap();
        assert!(!secret.is_empty());
    }
}
