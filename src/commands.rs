//! Non-interactive subcommands: print the sample data to stdout

use anyhow::{Context, Result};

use crate::error::MockupError;
use crate::models::sample::{find_chat, sample_chats, sample_messages};
use crate::models::{ChatSummary, Message, Sender};

/// Print the chat list.
pub fn list_chats(json: bool) -> Result<()> {
    let chats = sample_chats();
    tracing::debug!(count = chats.len(), "listing chats");
    if json {
        let out = serde_json::to_string_pretty(&chats).context("Failed to serialize chats")?;
        println!("{}", out);
    } else {
        print!("{}", format_chats(&chats));
    }
    Ok(())
}

/// Print the conversation for one chat.
pub fn read_chat(chat_id: u32, json: bool, display_name: &str) -> Result<()> {
    let chat = find_chat(chat_id).ok_or(MockupError::UnknownChat(chat_id))?;
    let messages = sample_messages();
    if json {
        let out =
            serde_json::to_string_pretty(&messages).context("Failed to serialize messages")?;
        println!("{}", out);
    } else {
        print!("{}", format_conversation(&chat, &messages, display_name));
    }
    Ok(())
}

fn format_chats(chats: &[ChatSummary]) -> String {
    let mut out = String::from("\nMessages:\n");
    out.push_str(&format!("{:-<60}\n", ""));

    if chats.is_empty() {
        out.push_str("  (no chats found)\n");
        return out;
    }

    for chat in chats {
        let marker = if chat.unread { " *" } else { "" };
        out.push_str(&format!("{}{}\n", chat.name, marker));
        out.push_str(&format!("  ID: {}\n", chat.id));
        out.push_str(&format!("  Last: {}\n", chat.time));
        out.push_str(&format!("  {}\n\n", chat.last_message));
    }
    out
}

fn format_conversation(chat: &ChatSummary, messages: &[Message], display_name: &str) -> String {
    let mut out = format!("{} (Online)\n{:-<60}\n", chat.name, "");
    if messages.is_empty() {
        out.push_str("(no messages)\n");
        return out;
    }
    for msg in messages {
        let sender = match msg.sender {
            Sender::User => display_name,
            Sender::Other => chat.name.as_str(),
        };
        out.push_str(&format!("[{}] {}: {}\n", msg.timestamp, sender, msg.content));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_chats() {
        let out = format_chats(&sample_chats());
        assert!(out.contains("Sarah Parker *\n  ID: 1\n"));
        assert!(out.contains("John Smith\n  ID: 2\n"));
        assert!(out.contains("  Last: 2h ago\n"));
    }

    #[test]
    fn test_format_chats_empty() {
        assert!(format_chats(&[]).contains("(no chats found)"));
    }

    #[test]
    fn test_format_conversation_names_senders() {
        let chat = find_chat(1).unwrap();
        let out = format_conversation(&chat, &sample_messages(), "You");
        assert!(out.starts_with("Sarah Parker (Online)\n"));
        assert!(out.contains("[10:00 AM] Sarah Parker: Hi there! How are you?\n"));
        assert!(out.contains("[10:01 AM] You: I'm doing great"));
    }

    #[test]
    fn test_read_unknown_chat_errors() {
        let err = read_chat(404, false, "You").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MockupError>(),
            Some(MockupError::UnknownChat(404))
        ));
    }
}
