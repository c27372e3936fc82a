//! Scripted completion service for development and tests

use crate::{CompletionError, CompletionRequest, CompletionService};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

enum Scripted {
    Reply(String),
    Failure(String),
}

/// Answers requests from a queue of canned replies, then from an optional
/// fallback reply. Every request is recorded.
#[derive(Default)]
pub struct ScriptedCompletion {
    queue: Mutex<VecDeque<Scripted>>,
    fallback: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `reply` to every request once the queue is empty.
    pub fn repeating(reply: impl Into<String>) -> Self {
        Self {
            fallback: Some(reply.into()),
            ..Self::default()
        }
    }

    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.queue.lock().push_back(Scripted::Reply(reply.into()));
        self
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.queue
            .lock()
            .push_back(Scripted::Failure(message.into()));
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().push(request.clone());
        let next = self.queue.lock().pop_front();
        match next {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Failure(message)) => Err(CompletionError::Unavailable(message)),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| CompletionError::Unavailable("no scripted reply left".to_string())),
        }
    }
}
