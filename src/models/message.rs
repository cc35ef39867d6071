//! Message model

use serde::{Deserialize, Serialize};

/// Who wrote a message. There are exactly two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The local participant.
    User,
    Other,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u32,
    pub content: String,
    pub sender: Sender,
    /// Display timestamp, e.g. "10:00 AM".
    pub timestamp: String,
}

impl Message {
    pub fn is_local(&self) -> bool {
        self.sender == Sender::User
    }
}
