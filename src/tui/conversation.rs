//! Conversation screen: contact header, message bubbles and the compose box.

use chrono::{Local, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::avatar;
use super::compose;
use super::input::TextInput;
use crate::models::{ChatSummary, Message, Sender};

/// Bubbles take at most this share of the pane width.
const BUBBLE_MAX_PERCENT: usize = 70;

/// Narrowest bubble worth drawing.
const BUBBLE_MIN_WIDTH: usize = 10;

/// What the screen switcher should do after a key press in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationAction {
    None,
    Back,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct ConversationState {
    pub chat: ChatSummary,
    pub messages: Vec<Message>,
    pub compose: TextInput,
    /// Lines scrolled up from the bottom (0 = following the newest message).
    scroll_from_bottom: usize,
    /// Height of the message pane at the last draw, used for paging.
    page_height: usize,
    /// strftime pattern for new message timestamps.
    time_format: &'static str,
}

impl ConversationState {
    pub fn new(chat: ChatSummary, messages: Vec<Message>, time_format: &'static str) -> Self {
        Self {
            chat,
            messages,
            compose: TextInput::default(),
            scroll_from_bottom: 0,
            page_height: 10,
            time_format,
        }
    }

    pub fn chat_id(&self) -> u32 {
        self.chat.id
    }

    /// Whether the pane is pinned to the newest message.
    pub fn is_following(&self) -> bool {
        self.scroll_from_bottom == 0
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }

    /// Send the compose text stamped with the current local time.
    pub fn submit(&mut self) -> Option<&Message> {
        self.submit_at(Local::now().time())
    }

    /// Append the compose text as a local message sent at `time`.
    ///
    /// Blank input appends nothing and leaves the compose box as it was.
    pub fn submit_at(&mut self, time: NaiveTime) -> Option<&Message> {
        let content = self.compose.submit()?;
        let message = Message {
            id: self.messages.len() as u32 + 1,
            content,
            sender: Sender::User,
            timestamp: time.format(self.time_format).to_string(),
        };
        tracing::debug!(
            chat_id = self.chat.id,
            message_id = message.id,
            "appended local message"
        );
        self.messages.push(message);
        self.scroll_to_bottom();
        self.messages.last()
    }

    /// Handle a key press while the conversation is shown.
    pub fn handle_key(&mut self, key: KeyEvent) -> ConversationAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return ConversationAction::Back,
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.compose.insert_newline()
            }
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(self.page_height.max(1)),
            KeyCode::PageDown => self.scroll_down(self.page_height.max(1)),
            KeyCode::End if ctrl => self.scroll_to_bottom(),
            KeyCode::Left => self.compose.move_left(),
            KeyCode::Right => self.compose.move_right(),
            KeyCode::Home => self.compose.move_home(),
            KeyCode::End => self.compose.move_end(),
            KeyCode::Backspace => self.compose.backspace(),
            KeyCode::Delete => self.compose.delete(),
            KeyCode::Char('u') if ctrl => self.compose.clear(),
            KeyCode::Char(c) if !ctrl => self.compose.insert_char(c),
            _ => {}
        }
        ConversationAction::None
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the conversation screen into `area`.
///
/// Takes the state mutably to clamp the scroll position against the laid-out
/// content.
pub fn render(area: Rect, frame: &mut Frame, state: &mut ConversationState) {
    let [header_area, pane_area, compose_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(compose::COMPOSE_HEIGHT),
    ])
    .areas(area);

    render_header(header_area, frame.buffer_mut(), &state.chat);
    render_messages(pane_area, frame.buffer_mut(), state);
    compose::render(compose_area, frame, &state.compose);
}

fn render_header(area: Rect, buf: &mut Buffer, chat: &ChatSummary) {
    let back = Span::styled(" \u{2190} Esc ", Style::default().fg(Color::Gray));
    let name = Span::styled(
        format!(" {}", chat.name),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let indent = " ".repeat(back.width() + 4);
    let lines = vec![
        Line::from(vec![back, avatar::badge(&chat.name), name]),
        Line::from(vec![
            Span::raw(indent),
            Span::styled(" Online", Style::default().fg(Color::Green)),
        ]),
        Line::from(Span::styled(
            "\u{2500}".repeat(area.width as usize),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    Paragraph::new(lines).render(area, buf);
}

fn render_messages(area: Rect, buf: &mut Buffer, state: &mut ConversationState) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let lines = build_message_lines(&state.messages, area.width as usize);
    let total = lines.len();
    let visible = area.height as usize;
    state.page_height = visible;

    let max_scroll = total.saturating_sub(visible);
    state.scroll_from_bottom = state.scroll_from_bottom.min(max_scroll);
    let first = max_scroll - state.scroll_from_bottom;

    // Anchor short conversations to the bottom of the pane.
    let top_pad = visible.saturating_sub(total);

    for (row, line) in lines.into_iter().skip(first).take(visible).enumerate() {
        let y = area.y + (top_pad + row) as u16;
        Paragraph::new(line).render(Rect::new(area.x, y, area.width, 1), buf);
    }

    if total > visible {
        let x = area.x + area.width.saturating_sub(1);
        let indicator = Style::default().fg(Color::DarkGray);
        if first > 0 {
            let cell = &mut buf[(x, area.y)];
            cell.set_char('^');
            cell.set_style(indicator);
        }
        if state.scroll_from_bottom > 0 {
            let cell = &mut buf[(x, area.y + area.height - 1)];
            cell.set_char('v');
            cell.set_style(indicator);
        }
    }
}

/// Lay out all messages as bubbles, one blank line apart.
fn build_message_lines(messages: &[Message], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    // One column of margin on each side of the pane.
    let inner = width.saturating_sub(2);
    let max_bubble = (inner * BUBBLE_MAX_PERCENT / 100).max(BUBBLE_MIN_WIDTH.min(inner));

    for (i, msg) in messages.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        push_bubble(&mut lines, msg, inner, max_bubble);
    }
    lines
}

fn push_bubble(lines: &mut Vec<Line<'static>>, msg: &Message, inner: usize, max_bubble: usize) {
    // Bubble rows are " text " so content gets two columns less.
    let content_width = max_bubble.saturating_sub(2);
    if content_width == 0 {
        return;
    }
    let body = wrap_text(&msg.content, content_width);
    let bubble_width = body
        .iter()
        .map(|l| l.width())
        .chain(std::iter::once(msg.timestamp.width()))
        .max()
        .unwrap_or(0)
        + 2;

    let (bubble_style, left_pad) = if msg.is_local() {
        (
            Style::default().fg(Color::Black).bg(Color::Cyan),
            1 + inner.saturating_sub(bubble_width),
        )
    } else {
        (Style::default().fg(Color::White).bg(Color::DarkGray), 1)
    };

    let row = |text: &str, style: Style| {
        let fill = bubble_width.saturating_sub(text.width() + 2);
        Line::from(vec![
            Span::raw(" ".repeat(left_pad)),
            Span::styled(format!(" {}{} ", text, " ".repeat(fill)), style),
        ])
    };

    for text in &body {
        lines.push(row(text.as_str(), bubble_style));
    }
    lines.push(row(msg.timestamp.as_str(), bubble_style.add_modifier(Modifier::DIM)));
}

/// Word-wrap `text` to `max_width` columns, splitting words that are too long.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }
    let mut result = Vec::new();
    for line in text.lines() {
        let mut current = String::new();
        for word in line.split_whitespace() {
            let sep = usize::from(!current.is_empty());
            if current.width() + sep + word.width() <= max_width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
            for ch in word.chars() {
                if current.width() + ch.width().unwrap_or(0) > max_width {
                    result.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
        }
        result.push(current);
    }
    if result.is_empty() {
        result.push(String::new());
    }
    result
}
