//! Data models for the mockup's chats and messages

mod chat;
mod message;
pub mod sample;

pub use chat::*;
pub use message::*;
