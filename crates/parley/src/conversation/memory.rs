//! In-process conversation store
//!
//! Lives for the lifetime of the daemon; everything is lost on restart.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::conversation::store::{ConversationStore, Result};
use crate::conversation::types::MessageEntry;

/// Conversation store backed by a concurrent map of (sender, recipient) → log
///
/// Appends to one pair hold that shard's write lock, so concurrent sends
/// never lose entries and each log stays in arrival order.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    logs: DashMap<(String, String), Vec<MessageEntry>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_non_empty(&self, sender: &str, recipient: &str) -> Option<Vec<MessageEntry>> {
        self.logs
            .get(&(sender.to_string(), recipient.to_string()))
            .filter(|log| !log.is_empty())
            .map(|log| log.value().clone())
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn append(&self, entry: MessageEntry) -> Result<()> {
        self.logs
            .entry((entry.sender.clone(), entry.recipient.clone()))
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn conversation(&self, user1: &str, user2: &str) -> Result<Vec<MessageEntry>> {
        Ok(self
            .get_non_empty(user1, user2)
            .or_else(|| self.get_non_empty(user2, user1))
            .unwrap_or_default())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.logs.iter().map(|log| log.value().len()).sum())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
