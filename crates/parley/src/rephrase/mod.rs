//! Rephrase module: tone selection and the completion call
//!
//! Maps a category selector to a system instruction, sends the message to
//! a chat completion API, and falls back to the original text on failure.

pub mod category;
pub mod client;
pub mod openai;
pub mod prompts;
pub mod service;
pub mod types;

pub use category::Category;
pub use client::CompletionClient;
pub use openai::OpenAiCompletionClient;
pub use service::Rephraser;
pub use types::{RephraseError, RephraseOutcome};
