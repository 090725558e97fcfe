//! Error types for Parley

use thiserror::Error;

use crate::reload::ReloadError;
use crate::rephrase::RephraseError;

/// Main error type for Parley operations
#[derive(Error, Debug)]
pub enum ParleyError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// Completion client setup errors
    #[error("Rephrase error: {0}")]
    Rephrase(#[from] RephraseError),

    /// Reload trigger errors
    #[error("Reload error: {0}")]
    Reload(#[from] ReloadError),
}

/// Result type alias for Parley operations
pub type Result<T> = std::result::Result<T, ParleyError>;
