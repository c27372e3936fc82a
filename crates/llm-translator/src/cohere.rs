//! HTTP client for the Cohere chat endpoint (or a compatible shim).

use crate::{CompletionError, CompletionRequest, CompletionService};
use async_trait::async_trait;
use std::time::Duration;

/// Endpoint and model settings
#[derive(Debug, Clone)]
pub struct CohereConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for CohereConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.cohere.ai/v1/chat".to_string(),
            model: "command-r".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct CohereChatClient {
    config: CohereConfig,
    api_key: String,
    client: reqwest::Client,
}

impl CohereChatClient {
    pub fn new(api_key: impl Into<String>, config: CohereConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Http(e.to_string()))?;
        Ok(Self {
            config,
            api_key: api_key.into(),
            client,
        })
    }

    /// Read the API key from environment variable `var`. An unset or blank
    /// variable is an error.
    pub fn from_env(var: &str, config: CohereConfig) -> Result<Self, CompletionError> {
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CompletionError::MissingCredential(var.to_string()))?;
        Self::new(api_key.trim(), config)
    }
}

#[derive(serde::Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    model: &'a str,
    temperature: f32,
}

// Only the reply text is used; other response fields are ignored.
#[derive(serde::Deserialize)]
struct ChatResponse {
    text: String,
}

#[async_trait]
impl CompletionService for CohereChatClient {
    fn name(&self) -> &str {
        "cohere"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatRequest {
            message: &request.prompt,
            model: &self.config.model,
            temperature: request.temperature,
        };

        let start = std::time::Instant::now();
        let resp = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = resp
            .json()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;
        tracing::debug!(
            model = %self.config.model,
            "chat completion in {}ms",
            start.elapsed().as_millis()
        );
        Ok(reply.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CohereConfig::default();
        assert_eq!(config.model, "command-r");
        assert!(config.endpoint.ends_with("/v1/chat"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_credential() {
        let var = "LLM_TRANSLATOR_TEST_UNSET_KEY";
        std::env::remove_var(var);
        match CohereChatClient::from_env(var, CohereConfig::default()) {
            Err(CompletionError::MissingCredential(name)) => assert_eq!(name, var),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("client created without a key"),
        }
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            message: "Command: stop",
            model: "command-r",
            temperature: 0.3,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "Command: stop");
        assert_eq!(json["model"], "command-r");
        assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }
}
