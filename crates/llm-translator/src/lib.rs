//! llm-translator: natural-language robot commands to velocity commands
//!
//! A [`Translator`] wraps a [`CompletionService`] (a hosted LLM chat endpoint,
//! or a scripted stand-in) with a fixed instruction template, and parses the
//! model's JSON reply into a [`cmd_vel::EmissionRequest`]. Translation failures
//! never escape [`Translator::translate`]: they are logged and reported as
//! `None`.

mod error;
pub use error::{CompletionError, Result, TranslateError};

mod types;
pub use types::{CompletionRequest, DiscreteAction};

mod traits;
pub use traits::CompletionService;

pub mod prompt;
pub mod reply;

mod translator;
pub use translator::{Translator, TranslatorConfig};

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::ScriptedCompletion;

#[cfg(feature = "cohere")]
mod cohere;
#[cfg(feature = "cohere")]
pub use cohere::{CohereChatClient, CohereConfig};
