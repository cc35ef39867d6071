//! Chat summary model

use serde::{Deserialize, Serialize};

/// One conversation entry shown in the chat list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    /// Presentation-only identifier (not globally unique).
    pub id: u32,
    pub name: String,
    /// Hosted avatar image. Never fetched by the terminal UI.
    pub avatar_url: String,
    /// Preview of the last message in the conversation.
    pub last_message: String,
    /// Relative timestamp text, e.g. "2m ago".
    pub time: String,
    pub unread: bool,
}

impl ChatSummary {
    /// Case-insensitive match on display name or preview text.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.last_message.to_lowercase().contains(&query)
    }
}
