//! Test utilities for parley - completion client and store doubles
//!
//! These stand in for the external completion API and for a failing
//! storage backend so handler tests run without network access.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::conversation::{ConversationStore, MessageEntry, StoreError};
use crate::rephrase::{CompletionClient, RephraseError};

/// Always returns the same completion text.
#[derive(Debug, Clone)]
pub struct StaticCompletionClient {
    reply: String,
}

impl StaticCompletionClient {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for StaticCompletionClient {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, RephraseError> {
        Ok(self.reply.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Always fails as if the API were unreachable.
#[derive(Debug, Clone, Default)]
pub struct FailingCompletionClient;

impl FailingCompletionClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompletionClient for FailingCompletionClient {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, RephraseError> {
        Err(RephraseError::Network("mock failure".into()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Replies with `[system] user` so tests can see which instruction was sent.
/// Counts calls.
#[derive(Debug, Default)]
pub struct EchoCompletionClient {
    calls: AtomicUsize,
}

impl EchoCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for EchoCompletionClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, RephraseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{system}] {user}"))
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

/// Store whose writes always fail; reads return nothing.
#[derive(Debug, Clone, Default)]
pub struct FailingConversationStore;

#[async_trait]
impl ConversationStore for FailingConversationStore {
    async fn append(&self, _entry: MessageEntry) -> crate::conversation::store::Result<()> {
        Err(StoreError::Write("disk full".into()))
    }

    async fn conversation(
        &self,
        _user1: &str,
        _user2: &str,
    ) -> crate::conversation::store::Result<Vec<MessageEntry>> {
        Ok(Vec::new())
    }

    async fn len(&self) -> crate::conversation::store::Result<usize> {
        Ok(0)
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
