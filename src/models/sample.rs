//! Hard-coded sample data shown by the mockup.

use super::{ChatSummary, Message, Sender};

fn chat(
    id: u32,
    name: &str,
    last_message: &str,
    time: &str,
    unread: bool,
    photo: &str,
) -> ChatSummary {
    ChatSummary {
        id,
        name: name.to_string(),
        avatar_url: format!(
            "https://images.unsplash.com/photo-{}?q=80&w=256&h=256&auto=format&fit=crop",
            photo
        ),
        last_message: last_message.to_string(),
        time: time.to_string(),
        unread,
    }
}

fn message(id: u32, sender: Sender, content: &str, timestamp: &str) -> Message {
    Message {
        id,
        content: content.to_string(),
        sender,
        timestamp: timestamp.to_string(),
    }
}

/// The chat list, in display order.
pub fn sample_chats() -> Vec<ChatSummary> {
    vec![
        chat(
            1,
            "Sarah Parker",
            "Sure, let's meet tomorrow!",
            "2m ago",
            true,
            "1494790108377-be9c29b29330",
        ),
        chat(
            2,
            "John Smith",
            "The project is coming along nicely",
            "1h ago",
            false,
            "1472099645785-5658abf4ff4e",
        ),
        chat(
            3,
            "Emma Wilson",
            "Did you see the latest updates?",
            "2h ago",
            true,
            "1619895862022-09114b41f16f",
        ),
    ]
}

/// The messages every conversation opens with.
pub fn sample_messages() -> Vec<Message> {
    vec![
        message(1, Sender::Other, "Hi there! How are you?", "10:00 AM"),
        message(
            2,
            Sender::User,
            "I'm doing great, thanks! How about you?",
            "10:01 AM",
        ),
        message(
            3,
            Sender::Other,
            "Pretty good! Just working on some new features.",
            "10:02 AM",
        ),
    ]
}

/// Look up a sample chat by identifier.
pub fn find_chat(id: u32) -> Option<ChatSummary> {
    sample_chats().into_iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_chats() {
        let chats = sample_chats();
        assert_eq!(chats.len(), 3);
        assert_eq!(chats[0].name, "Sarah Parker");
        assert!(chats[0].unread);
        assert!(!chats[1].unread);
        assert!(chats[2].avatar_url.starts_with("https://images.unsplash.com/"));
    }

    #[test]
    fn test_sample_messages_alternate_senders() {
        let msgs = sample_messages();
        let senders: Vec<Sender> = msgs.iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::Other, Sender::User, Sender::Other]);
        assert_eq!(msgs[2].timestamp, "10:02 AM");
    }

    #[test]
    fn test_find_chat() {
        assert_eq!(find_chat(2).map(|c| c.name), Some("John Smith".to_string()));
        assert!(find_chat(42).is_none());
    }

    #[test]
    fn test_chat_matches_query() {
        let chats = sample_chats();
        assert!(chats[0].matches(""));
        assert!(chats[0].matches("sarah"));
        assert!(chats[1].matches("PROJECT"));
        assert!(!chats[2].matches("sarah"));
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&sample_messages()[1]).unwrap();
        assert!(json.contains("\"sender\":\"user\""));
    }
}
