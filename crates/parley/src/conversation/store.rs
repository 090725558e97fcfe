//! Conversation store trait
//!
//! Storage is keyed by the ordered (sender, recipient) pair. Reads treat
//! the pair as unordered: (A, B) is checked first, then (B, A).

use async_trait::async_trait;

use crate::conversation::types::MessageEntry;

/// Conversation store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write entry: {0}")]
    Write(String),
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Append-only log of messages between pairs of users
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Append an entry under (entry.sender, entry.recipient)
    async fn append(&self, entry: MessageEntry) -> Result<()>;

    /// Messages exchanged between two users
    ///
    /// Returns the (user1, user2) log if it is non-empty, otherwise the
    /// (user2, user1) log, otherwise an empty list.
    async fn conversation(&self, user1: &str, user2: &str) -> Result<Vec<MessageEntry>>;

    /// Total number of stored entries
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
