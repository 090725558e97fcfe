//! Best-effort rephrasing on top of a completion client

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::rephrase::category::Category;
use crate::rephrase::client::CompletionClient;
use crate::rephrase::types::{RephraseError, RephraseOutcome};

/// Rewrites messages in a chosen tone, falling back to the original text
pub struct Rephraser {
    client: Arc<dyn CompletionClient>,
    timeout: Option<Duration>,
}

impl Rephraser {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Give up on the completion call after `timeout` and deliver the original
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Rephrase `original` using the instruction for `category`
    ///
    /// Issues exactly one completion call. Any failure, including a blank
    /// completion, is logged and turned into `RephraseOutcome::Fallback`.
    pub async fn rephrase(&self, original: &str, category: &Category) -> RephraseOutcome {
        let call = self.client.complete(category.instruction(), original);
        let completed = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                Err(RephraseError::Network(format!(
                    "completion timed out after {limit:?}"
                )))
            }),
            None => call.await,
        };

        let result = completed.and_then(|content| {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                Err(RephraseError::EmptyResponse)
            } else {
                Ok(trimmed.to_string())
            }
        });

        match result {
            Ok(text) => {
                debug!(
                    client = self.client.name(),
                    category = %category,
                    "Message rephrased"
                );
                RephraseOutcome::Rephrased(text)
            }
            Err(cause) => {
                warn!(
                    client = self.client.name(),
                    category = %category,
                    error = %cause,
                    "Rephrasing failed, delivering original message"
                );
                RephraseOutcome::Fallback {
                    original: original.to_string(),
                    cause,
                }
            }
        }
    }
}
