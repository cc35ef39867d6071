//! Domain errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockupError {
    #[error("no chat with id {0} (run `chats` to list them)")]
    UnknownChat(u32),
}
