//! Conversation logs between pairs of users

pub mod memory;
pub mod store;
pub mod types;

pub use memory::InMemoryConversationStore;
pub use store::{ConversationStore, StoreError};
pub use types::MessageEntry;
