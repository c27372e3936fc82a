use thiserror::Error;

pub type Result<T, E = TranslateError> = core::result::Result<T, E>;

/// Failure talking to the completion service
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("missing credential: environment variable {0} is not set")]
    MissingCredential(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode service response: {0}")]
    Decode(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Failure turning text into an emission request
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reply does not match the twist schema: {0}")]
    Schema(String),
}
