use crate::{CompletionError, CompletionRequest};
use async_trait::async_trait;

/// A hosted text-completion endpoint: prompt in, free text out.
///
/// Replies are not assumed deterministic; two calls with the same request may
/// differ.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Send one request and return the reply text. Exactly one attempt.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
