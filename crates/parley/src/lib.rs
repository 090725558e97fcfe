//! Parley - an HTTP relay that rephrases chat messages through an LLM
//!
//! Messages sent through the relay are rewritten in a chosen tone by an
//! OpenAI-compatible completion API and logged per sender/recipient pair.

pub mod config;
pub mod conversation;
pub mod error;
pub mod reload;
pub mod rephrase;
pub mod server;
pub mod testing;

pub use error::ParleyError;
