//! Chat list screen: title, toolbar, search box and the list of chats.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::avatar;
use super::input::TextInput;
use crate::models::ChatSummary;

/// Rows per chat entry: name line, preview line, separator.
const ROW_HEIGHT: usize = 3;

/// What the screen switcher should do after a key press on the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    None,
    /// Open the conversation for this chat id.
    Open(u32),
    /// Show a transient notice in the status bar.
    Notice(String),
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct ChatListState {
    chats: Vec<ChatSummary>,
    /// Search query typed into the search box.
    pub search: TextInput,
    /// Whether keystrokes go to the search box.
    pub search_focused: bool,
    /// Index into the filtered list.
    pub selected: usize,
}

impl ChatListState {
    pub fn new(chats: Vec<ChatSummary>) -> Self {
        Self {
            chats,
            search: TextInput::default(),
            search_focused: false,
            selected: 0,
        }
    }

    /// Look up a chat by identifier, ignoring the search filter.
    pub fn chat(&self, id: u32) -> Option<&ChatSummary> {
        self.chats.iter().find(|c| c.id == id)
    }

    /// Chats matching the current search query, in display order.
    pub fn visible_chats(&self) -> Vec<&ChatSummary> {
        self.chats
            .iter()
            .filter(|c| c.matches(self.search.text()))
            .collect()
    }

    pub fn selected_chat(&self) -> Option<&ChatSummary> {
        self.visible_chats().get(self.selected).copied()
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.visible_chats().len() {
            self.selected += 1;
        }
    }

    pub fn move_first(&mut self) {
        self.selected = 0;
    }

    pub fn move_last(&mut self) {
        self.selected = self.visible_chats().len().saturating_sub(1);
    }

    /// Keep the selection inside the filtered list after the query changes.
    fn clamp_selection(&mut self) {
        let count = self.visible_chats().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    fn open_selected(&self) -> ListAction {
        match self.selected_chat() {
            Some(chat) => ListAction::Open(chat.id),
            None => ListAction::None,
        }
    }

    /// Handle a key press while the list screen is shown.
    pub fn handle_key(&mut self, key: KeyEvent) -> ListAction {
        if self.search_focused {
            return self.handle_search_key(key);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Home | KeyCode::Char('g') => self.move_first(),
            KeyCode::End | KeyCode::Char('G') => self.move_last(),
            KeyCode::Enter => return self.open_selected(),
            KeyCode::Char('/') => self.search_focused = true,
            KeyCode::Char('r') => {
                return ListAction::Notice("Random Chat is not available in this mockup".into())
            }
            KeyCode::Char('e') => {
                return ListAction::Notice("Enter Room is not available in this mockup".into())
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if idx < self.visible_chats().len() {
                    self.selected = idx;
                    return self.open_selected();
                }
            }
            _ => {}
        }
        ListAction::None
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> ListAction {
        match key.code {
            KeyCode::Esc => self.search_focused = false,
            KeyCode::Enter => {
                self.search_focused = false;
                return self.open_selected();
            }
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.move_home(),
            KeyCode::End => self.search.move_end(),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.clear()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.insert_char(c)
            }
            _ => return ListAction::None,
        }
        self.clamp_selection();
        ListAction::None
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the chat list screen into `area`.
pub fn render(area: Rect, frame: &mut Frame, state: &ChatListState) {
    let [title_area, toolbar_area, search_area, list_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    let title = Line::from(Span::styled(
        " Messages",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    Paragraph::new(title).render(title_area, frame.buffer_mut());

    render_toolbar(toolbar_area, frame.buffer_mut());
    render_search(search_area, frame, state);
    render_chats(list_area, frame.buffer_mut(), state);
}

fn render_toolbar(area: Rect, buf: &mut Buffer) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::Gray);
    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled("[r]", key_style),
        Span::styled(" + Random Chat   ", label_style),
        Span::styled("[e]", key_style),
        Span::styled(" # Enter Room", label_style),
    ]);
    Paragraph::new(line).render(area, buf);
}

fn render_search(area: Rect, frame: &mut Frame, state: &ChatListState) {
    let focused = state.search_focused;
    let (border_style, border_type) = if focused {
        (Style::default().fg(Color::Yellow), BorderType::Double)
    } else {
        (Style::default().fg(Color::DarkGray), BorderType::Plain)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width < 4 || inner.height == 0 {
        return;
    }

    // " / " search icon, then the input.
    let prefix = " / ";
    let input_width = inner.width as usize - prefix.len();
    let line = if state.search.is_empty() {
        Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::DarkGray)),
            Span::styled("Search chats...", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        let display = state.search.display(input_width);
        Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::DarkGray)),
            Span::styled(display.visible, Style::default().fg(Color::White)),
        ])
    };
    Paragraph::new(line).render(inner, frame.buffer_mut());

    if focused {
        let column = state.search.display(input_width).cursor_column;
        frame.set_cursor_position((inner.x + prefix.len() as u16 + column as u16, inner.y));
    }
}

fn render_chats(area: Rect, buf: &mut Buffer, state: &ChatListState) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let chats = state.visible_chats();
    if chats.is_empty() {
        let line = Line::from(Span::styled(
            " No chats found",
            Style::default().fg(Color::DarkGray),
        ));
        Paragraph::new(line).render(Rect::new(area.x, area.y, area.width, 1), buf);
        return;
    }

    let rows_fit = (area.height as usize / ROW_HEIGHT).max(1);
    let offset = compute_scroll_offset(state.selected, rows_fit, chats.len());

    for (slot, idx) in (offset..chats.len()).take(rows_fit).enumerate() {
        let y = area.y + (slot * ROW_HEIGHT) as u16;
        let height = (area.y + area.height).saturating_sub(y).min(ROW_HEIGHT as u16);
        if height == 0 {
            break;
        }
        let row = Rect::new(area.x, y, area.width, height);
        render_chat_row(row, buf, chats[idx], idx == state.selected);
    }
}

/// Keep the selected row visible.
fn compute_scroll_offset(selected: usize, height: usize, total: usize) -> usize {
    if total <= height || selected < height {
        return 0;
    }
    let max_offset = total.saturating_sub(height);
    selected.saturating_sub(height - 1).min(max_offset)
}

fn render_chat_row(area: Rect, buf: &mut Buffer, chat: &ChatSummary, selected: bool) {
    let width = area.width as usize;
    let base = if selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let cursor = if selected { "\u{25BA}" } else { " " };

    // Line 1: cursor, avatar, name ... unread dot, time
    let name_style = base.fg(Color::White).add_modifier(Modifier::BOLD);
    let time_style = base.fg(Color::Gray);
    let dot = if chat.unread { "\u{25CF} " } else { "" };
    let right_width = dot.width() + chat.time.width() + 1;
    // cursor + badge (4) + gap
    let lead_width = 1 + 4 + 1;
    let name_width = width.saturating_sub(lead_width + right_width + 1);
    let name = truncate_to_width(&chat.name, name_width);
    let pad = width.saturating_sub(lead_width + name.width() + right_width);

    let first = Line::from(vec![
        Span::styled(cursor, base.fg(Color::Yellow)),
        avatar::badge(&chat.name),
        Span::styled(" ", base),
        Span::styled(name, name_style),
        Span::styled(" ".repeat(pad), base),
        Span::styled(dot, base.fg(Color::Blue)),
        Span::styled(format!("{} ", chat.time), time_style),
    ]);

    // Line 2: preview under the name
    let preview_width = width.saturating_sub(lead_width + 1);
    let preview = truncate_to_width(&chat.last_message, preview_width);
    let preview_pad = width.saturating_sub(lead_width + preview.width());
    let preview_style = if chat.unread {
        base.fg(Color::White)
    } else {
        base.fg(Color::Gray)
    };
    let second = Line::from(vec![
        Span::styled(" ".repeat(lead_width), base),
        Span::styled(preview, preview_style),
        Span::styled(" ".repeat(preview_pad), base),
    ]);

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(Color::DarkGray),
    ));

    Paragraph::new(vec![first, second, separator]).render(area, buf);
}

/// Cut `text` to at most `width` columns, ending with an ellipsis if cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample::sample_chats;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_enter_opens_selected_chat() {
        let mut state = ChatListState::new(sample_chats());
        state.handle_key(key(KeyCode::Down));
        assert_eq!(state.handle_key(key(KeyCode::Enter)), ListAction::Open(2));
    }

    #[test]
    fn test_digit_opens_chat() {
        let mut state = ChatListState::new(sample_chats());
        assert_eq!(state.handle_key(key(KeyCode::Char('3'))), ListAction::Open(3));
        assert_eq!(state.handle_key(key(KeyCode::Char('9'))), ListAction::None);
    }

    #[test]
    fn test_selection_bounds() {
        let mut state = ChatListState::new(sample_chats());
        state.move_up();
        assert_eq!(state.selected, 0);
        for _ in 0..10 {
            state.move_down();
        }
        assert_eq!(state.selected, 2);
        state.move_first();
        assert_eq!(state.selected, 0);
        state.move_last();
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_search_filters_and_clamps() {
        let mut state = ChatListState::new(sample_chats());
        state.move_last();
        state.handle_key(key(KeyCode::Char('/')));
        assert!(state.search_focused);
        for c in "john".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(state.visible_chats().len(), 1);
        assert_eq!(state.selected, 0);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), ListAction::Open(2));
        assert!(!state.search_focused);
    }

    #[test]
    fn test_search_no_match() {
        let mut state = ChatListState::new(sample_chats());
        state.search_focused = true;
        for c in "zzz".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        assert!(state.visible_chats().is_empty());
        assert_eq!(state.handle_key(key(KeyCode::Enter)), ListAction::None);
    }

    #[test]
    fn test_search_keys_do_not_navigate() {
        let mut state = ChatListState::new(sample_chats());
        state.search_focused = true;
        state.handle_key(key(KeyCode::Char('j')));
        assert_eq!(state.selected, 0);
        assert_eq!(state.search.text(), "j");
        state.handle_key(key(KeyCode::Esc));
        assert!(!state.search_focused);
        assert_eq!(state.search.text(), "j");
    }

    #[test]
    fn test_toolbar_actions_are_notices() {
        let mut state = ChatListState::new(sample_chats());
        assert!(matches!(
            state.handle_key(key(KeyCode::Char('r'))),
            ListAction::Notice(_)
        ));
        assert!(matches!(
            state.handle_key(key(KeyCode::Char('e'))),
            ListAction::Notice(_)
        ));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello\u{2026}");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(compute_scroll_offset(0, 2, 3), 0);
        assert_eq!(compute_scroll_offset(2, 2, 3), 1);
        assert_eq!(compute_scroll_offset(1, 5, 3), 0);
    }

    #[test]
    fn test_render_rows() {
        let state = ChatListState::new(sample_chats());
        let mut terminal = Terminal::new(TestBackend::new(50, 16)).unwrap();
        terminal
            .draw(|frame| render(frame.area(), frame, &state))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Messages"));
        assert!(text.contains("Search chats..."));
        assert!(text.contains("Sarah Parker"));
        assert!(text.contains("2m ago"));
        assert!(text.contains("SP"));
        assert!(text.contains("Random Chat"));
    }
}
