//! Terminal user interface using Ratatui.
//!
//! Two screens share the terminal: the chat list and a conversation.

mod app;
mod avatar;
mod chat_list;
mod compose;
mod conversation;
mod debug_log;
mod help;
mod input;
pub mod log_capture;
mod ui;

pub use app::run;
