//! Conversation log entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rephrase::Category;

/// One delivered message, as stored in a conversation log
///
/// Entries are immutable once created; stores only ever append them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEntry {
    pub sender: String,
    pub recipient: String,
    /// Rephrased text (or the original, if rephrasing fell back)
    pub message: String,
    pub original_message: String,
    /// Preset key, when a preset was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Caller-supplied instruction, when free text was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_prompt: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl MessageEntry {
    /// Create an entry stamped with the current time
    pub fn new(
        sender: String,
        recipient: String,
        message: String,
        original_message: String,
        category: &Category,
    ) -> Self {
        Self {
            sender,
            recipient,
            message,
            original_message,
            category: category.key().map(str::to_string),
            category_prompt: category.freeform_prompt().map(str::to_string),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_preset_sets_category_only() {
        let entry = MessageEntry::new(
            "u1".into(),
            "u2".into(),
            "Let's improve this.".into(),
            "this is bad".into(),
            &Category::Positive,
        );

        assert_eq!(entry.category.as_deref(), Some("positive"));
        assert!(entry.category_prompt.is_none());
    }

    #[test]
    fn test_new_with_freeform_sets_prompt_only() {
        let entry = MessageEntry::new(
            "u1".into(),
            "u2".into(),
            "Ahoy".into(),
            "hello".into(),
            &Category::Freeform("Talk like a pirate.".into()),
        );

        assert!(entry.category.is_none());
        assert_eq!(entry.category_prompt.as_deref(), Some("Talk like a pirate."));
    }

    #[test]
    fn test_serializes_camel_case() {
        let entry = MessageEntry::new(
            "u1".into(),
            "u2".into(),
            "Let's improve this.".into(),
            "this is bad".into(),
            &Category::Positive,
        );

        let json = serde_json::to_value(&entry).expect("Failed to serialize");
        assert_eq!(json["originalMessage"], "this is bad");
        assert_eq!(json["category"], "positive");
        assert!(json.get("categoryPrompt").is_none());
        assert!(json["timestamp"].is_string());
    }
}
