//! Text → emission request translation on top of a completion service

use crate::prompt::{classify_prompt, twist_prompt};
use crate::reply::{parse_discrete_reply, parse_twist_reply};
use crate::{CompletionRequest, CompletionService, DiscreteAction, Result};
use cmd_vel::EmissionRequest;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Sampling settings for the two prompt kinds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslatorConfig {
    /// Temperature for the twist prompt
    pub temperature: f32,
    /// Temperature for the one-word classification prompt
    pub classify_temperature: f32,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            classify_temperature: 0.2,
        }
    }
}

/// Turns operator text into velocity commands.
///
/// Holds the completion client it was given; construct the client once at
/// startup and share it.
#[derive(Clone)]
pub struct Translator {
    service: Arc<dyn CompletionService>,
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(service: Arc<dyn CompletionService>, config: TranslatorConfig) -> Self {
        Self { service, config }
    }

    /// Translate text into a command and duration, surfacing the failure cause.
    pub async fn try_translate(&self, text: &str) -> Result<EmissionRequest> {
        let request = CompletionRequest::new(twist_prompt(text), self.config.temperature);
        let reply = self.service.complete(&request).await?;
        debug!(service = self.service.name(), "completion reply: {}", reply.trim());
        parse_twist_reply(&reply)
    }

    /// Translate text into a command and duration.
    ///
    /// `None` means translation failed for any reason (service error,
    /// malformed or off-schema reply); the cause is logged here and not
    /// returned.
    pub async fn translate(&self, text: &str) -> Option<EmissionRequest> {
        match self.try_translate(text).await {
            Ok(request) => Some(request),
            Err(e) => {
                error!("failed to translate '{}': {}", text, e);
                None
            }
        }
    }

    /// Classify text into a coarse motion class. Failures read as `Unknown`.
    pub async fn classify(&self, text: &str) -> DiscreteAction {
        let request = CompletionRequest::new(classify_prompt(text), self.config.classify_temperature);
        match self.service.complete(&request).await {
            Ok(reply) => {
                let action = parse_discrete_reply(&reply);
                if action == DiscreteAction::Unknown {
                    debug!("unrecognised classification reply: {}", reply.trim());
                }
                action
            }
            Err(e) => {
                warn!("failed to classify '{}': {}", text, e);
                DiscreteAction::Unknown
            }
        }
    }
}
