use anyhow::{Context, Result};
use clap::ValueEnum;
use cmd_vel::EmitterConfig;
use llm_translator::{CohereConfig, TranslatorConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// How operator text is turned into motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMode {
    /// Ask the model for a full twist and duration
    Twist,
    /// Ask the model for one of forward/backward/left/right/stop
    Discrete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub classify_temperature: f32,
    pub timeout_secs: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        let cohere = CohereConfig::default();
        let sampling = TranslatorConfig::default();
        Self {
            endpoint: cohere.endpoint,
            model: cohere.model,
            temperature: sampling.temperature,
            classify_temperature: sampling.classify_temperature,
            timeout_secs: cohere.timeout.as_secs(),
            api_key_env: "COHERE_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterSettings {
    pub rate_hz: f64,
    pub topic: String,
    pub node_name: String,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            rate_hz: EmitterConfig::DEFAULT_RATE_HZ,
            topic: "/turtle1/cmd_vel".to_string(),
            node_name: "turtlesim_llm_agent_node".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorSettings {
    pub mode: TranslationMode,
    /// Run length for discrete actions, in seconds
    pub discrete_duration_s: f64,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            mode: TranslationMode::Twist,
            discrete_duration_s: 1.0,
        }
    }
}

/// Agent configuration, loaded from a JSON file. Missing sections and fields
/// take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub completion: CompletionSettings,
    pub emitter: EmitterSettings,
    pub translator: TranslatorSettings,
}

impl AgentConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config: {}", path.display()))
    }

    pub fn cohere(&self) -> CohereConfig {
        CohereConfig {
            endpoint: self.completion.endpoint.clone(),
            model: self.completion.model.clone(),
            timeout: Duration::from_secs(self.completion.timeout_secs),
        }
    }

    pub fn translator(&self) -> TranslatorConfig {
        TranslatorConfig {
            temperature: self.completion.temperature,
            classify_temperature: self.completion.classify_temperature,
        }
    }

    /// Emitter settings, with an invalid rate replaced by the default.
    pub fn emitter(&self) -> EmitterConfig {
        let config = EmitterConfig {
            rate_hz: self.emitter.rate_hz,
        };
        if config.is_valid() {
            return config;
        }
        warn!(
            "invalid emitter rate {} Hz, using {} Hz",
            self.emitter.rate_hz,
            EmitterConfig::DEFAULT_RATE_HZ
        );
        EmitterConfig::default()
    }
}
