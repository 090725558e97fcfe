//! Tone categories and how a request selects one
//!
//! A category is either one of the fixed presets or caller-supplied
//! instruction text. Unknown preset keys resolve to `Collaborative`.

use std::fmt;

use crate::rephrase::prompts::{
    COLLABORATIVE_PROMPT, POSITIVE_PROMPT, PROBLEM_SOLVING_PROMPT, SUPPORTIVE_PROMPT,
};

/// Tone used to build the system instruction for a completion call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    Positive,
    Supportive,
    #[default]
    Collaborative,
    ProblemSolving,
    /// Caller-supplied instruction used verbatim as the system prompt
    Freeform(String),
}

impl Category {
    /// Look up a preset by key, falling back to `Collaborative`
    ///
    /// Matching ignores case and surrounding whitespace, and accepts
    /// `problem_solving` as well as `problem-solving`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "positive" => Category::Positive,
            "supportive" => Category::Supportive,
            "collaborative" => Category::Collaborative,
            "problem-solving" | "problem_solving" => Category::ProblemSolving,
            other => {
                tracing::debug!("Unknown category key '{other}', using collaborative");
                Category::Collaborative
            }
        }
    }

    /// Resolve the selector carried by a send request
    ///
    /// A non-blank `category_prompt` wins when free-text prompts are allowed.
    /// Otherwise the `category` key is looked up; missing or blank selectors
    /// give the default preset.
    pub fn from_request(
        category: Option<&str>,
        category_prompt: Option<&str>,
        allow_freeform: bool,
    ) -> Self {
        if allow_freeform {
            if let Some(prompt) = category_prompt.filter(|p| !p.trim().is_empty()) {
                return Category::Freeform(prompt.to_string());
            }
        }

        match category.filter(|c| !c.trim().is_empty()) {
            Some(key) => Category::from_key(key),
            None => Category::default(),
        }
    }

    /// Canonical preset key, or `None` for free text
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Category::Positive => Some("positive"),
            Category::Supportive => Some("supportive"),
            Category::Collaborative => Some("collaborative"),
            Category::ProblemSolving => Some("problem-solving"),
            Category::Freeform(_) => None,
        }
    }

    /// System instruction sent with the completion request
    pub fn instruction(&self) -> &str {
        match self {
            Category::Positive => POSITIVE_PROMPT,
            Category::Supportive => SUPPORTIVE_PROMPT,
            Category::Collaborative => COLLABORATIVE_PROMPT,
            Category::ProblemSolving => PROBLEM_SOLVING_PROMPT,
            Category::Freeform(text) => text,
        }
    }

    /// The free-text prompt, if this is `Freeform`
    pub fn freeform_prompt(&self) -> Option<&str> {
        match self {
            Category::Freeform(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => write!(f, "{key}"),
            None => write!(f, "freeform"),
        }
    }
}
