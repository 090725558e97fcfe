//! Completion client trait
//!
//! Abstracts the external chat completion API so the rephraser can be
//! driven by the real HTTP client or by test doubles.

use async_trait::async_trait;

use crate::rephrase::types::RephraseError;

/// A single system + user exchange with a chat completion API
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one completion request and return the first choice's content
    ///
    /// The content is returned as-is; trimming is the caller's job.
    async fn complete(&self, system: &str, user: &str) -> Result<String, RephraseError>;

    /// Client name for logging
    fn name(&self) -> &'static str;
}
