//! Rephrase outcome and error types

/// Errors from the completion API
#[derive(Debug, Clone, thiserror::Error)]
pub enum RephraseError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Completion contained no text")]
    EmptyResponse,
    #[error("Configuration error: {0}")]
    Config(String),
}

/// What a rephrase attempt produced
///
/// Rephrasing is best-effort: a failed completion yields `Fallback` with the
/// caller's original text so delivery never depends on the external API.
#[derive(Debug, Clone)]
pub enum RephraseOutcome {
    /// Trimmed text of the first completion choice
    Rephrased(String),
    /// The completion failed; carries the untouched original
    Fallback {
        original: String,
        cause: RephraseError,
    },
}

impl RephraseOutcome {
    /// Text to deliver, whichever way the attempt went
    pub fn text(&self) -> &str {
        match self {
            RephraseOutcome::Rephrased(text) => text,
            RephraseOutcome::Fallback { original, .. } => original,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            RephraseOutcome::Rephrased(text) => text,
            RephraseOutcome::Fallback { original, .. } => original,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RephraseOutcome::Fallback { .. })
    }
}
