//! TUI application state, screen switching and the main event loop

use std::io;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{FutureExt, Stream, StreamExt};
use ratatui::{backend::Backend, Terminal};
use tokio_stream::wrappers::IntervalStream;

use super::chat_list::{ChatListState, ListAction};
use super::conversation::{ConversationAction, ConversationState};
use super::debug_log::DebugLogState;
use super::log_capture::LogBuffer;
use super::ui;
use crate::config::Config;
use crate::models::sample;

/// Which screen is shown. Holding a conversation means a chat is selected.
pub enum Screen {
    ChatList,
    Conversation(ConversationState),
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::ChatList => "chats",
            Screen::Conversation(_) => "conversation",
        }
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_exit: bool,
    /// Local participant's display name
    pub user_name: String,
    pub screen: Screen,
    /// List state survives while a conversation is open.
    pub chat_list: ChatListState,
    pub show_help: bool,
    pub debug_log: DebugLogState,
    /// Transient notice for the status bar, cleared on the next key.
    pub status_message: Option<String>,
    pub status_is_error: bool,
    time_format: &'static str,
}

impl App {
    pub fn new(config: &Config, logs: LogBuffer) -> Self {
        Self {
            should_exit: false,
            user_name: config.display_name.clone(),
            screen: Screen::ChatList,
            chat_list: ChatListState::new(sample::sample_chats()),
            show_help: false,
            debug_log: DebugLogState::new(logs, config.log_history),
            status_message: None,
            status_is_error: false,
            time_format: config.time_format(),
        }
    }

    /// Switch to the conversation view for `chat_id`.
    ///
    /// Every visit starts from the sample messages.
    pub fn open_chat(&mut self, chat_id: u32) {
        let Some(chat) = self.chat_list.chat(chat_id).cloned() else {
            tracing::warn!(chat_id, "ignoring selection of unknown chat");
            self.set_status(format!("No chat with id {}", chat_id), true);
            return;
        };
        tracing::debug!(chat_id, name = %chat.name, "opening conversation");
        self.screen = Screen::Conversation(ConversationState::new(
            chat,
            sample::sample_messages(),
            self.time_format,
        ));
    }

    /// Return to the chat list, discarding the open conversation.
    pub fn back(&mut self) {
        if let Some(chat_id) = self.selected_chat() {
            tracing::debug!(chat_id, "closing conversation");
        }
        self.screen = Screen::ChatList;
    }

    /// The chat currently open, if any.
    pub fn selected_chat(&self) -> Option<u32> {
        match &self.screen {
            Screen::ChatList => None,
            Screen::Conversation(conv) => Some(conv.chat_id()),
        }
    }

    fn set_status(&mut self, message: String, is_error: bool) {
        self.status_message = Some(message);
        self.status_is_error = is_error;
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(width, height) => {
                tracing::trace!(width, height, "terminal resized");
                if let Screen::Conversation(conv) = &mut self.screen {
                    conv.scroll_to_bottom();
                }
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        self.status_message = None;

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::F(1) => {
                self.show_help = true;
                return;
            }
            KeyCode::Char('d') if ctrl => {
                self.debug_log.toggle();
                return;
            }
            KeyCode::Up if ctrl && self.debug_log.visible => {
                self.debug_log.scroll_up(1);
                return;
            }
            KeyCode::Down if ctrl && self.debug_log.visible => {
                self.debug_log.scroll_down(1);
                return;
            }
            _ => {}
        }

        if let Screen::Conversation(conv) = &mut self.screen {
            if conv.handle_key(key) == ConversationAction::Back {
                self.back();
            }
            return;
        }

        if !self.chat_list.search_focused {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_exit = true;
                    return;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                    return;
                }
                _ => {}
            }
        }
        match self.chat_list.handle_key(key) {
            ListAction::None => {}
            ListAction::Open(chat_id) => self.open_chat(chat_id),
            ListAction::Notice(message) => self.set_status(message, false),
        }
    }

    /// Periodic work between input events.
    pub fn on_tick(&mut self) {
        self.debug_log.refresh();
    }

    pub fn render(&mut self, frame: &mut ratatui::Frame) {
        ui::render(frame, self);
    }
}

/// Run the TUI with panic-safe terminal restore
pub async fn run(config: &Config, logs: LogBuffer) -> Result<()> {
    let mut terminal = ratatui::init();
    let mut app = App::new(config, logs);
    let tick = Duration::from_millis(config.tick_rate_ms);
    tracing::info!("starting TUI");

    let result = AssertUnwindSafe(run_app(&mut terminal, &mut app, EventStream::new(), tick))
        .catch_unwind()
        .await;
    ratatui::restore();

    match result {
        Ok(r) => r,
        Err(e) => std::panic::resume_unwind(e),
    }
}

/// Draw, then wait for the next terminal event or tick, until quit.
///
/// Also returns when `events` ends.
pub async fn run_app<B, S>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events: S,
    tick: Duration,
) -> Result<()>
where
    B: Backend,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    let mut ticks = IntervalStream::new(tokio::time::interval(tick));

    while !app.should_exit {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => app.handle_event(event),
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => break,
            },
            _ = ticks.next() => app.on_tick(),
        }
    }

    Ok(())
}
