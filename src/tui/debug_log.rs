//! Debug log pane: captured tracing output shown under the active screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::log_capture::LogBuffer;

/// Height of the pane when visible, borders included.
pub const DEBUG_LOG_HEIGHT: u16 = 8;

pub struct DebugLogState {
    source: LogBuffer,
    lines: Vec<String>,
    /// Maximum lines kept for scrolling back.
    history: usize,
    pub visible: bool,
    /// Lines scrolled back from the newest (0 = newest at the bottom).
    scroll_back: usize,
}

impl DebugLogState {
    pub fn new(source: LogBuffer, history: usize) -> Self {
        Self {
            source,
            lines: Vec::new(),
            history: history.max(1),
            visible: false,
            scroll_back: 0,
        }
    }

    /// Pull newly captured lines out of the shared buffer.
    ///
    /// While scrolled back, the view stays on the same lines instead of
    /// drifting as new output arrives.
    pub fn refresh(&mut self) {
        let fresh = self.source.drain();
        if fresh.is_empty() {
            return;
        }
        if self.scroll_back > 0 {
            self.scroll_back += fresh.len();
        }
        self.lines.extend(fresh);
        let excess = self.lines.len().saturating_sub(self.history);
        self.lines.drain(..excess);
        self.scroll_back = self.scroll_back.min(self.lines.len().saturating_sub(1));
    }

    /// Show or hide the pane. Opening jumps to the newest line.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.scroll_back = 0;
        }
    }

    pub fn scroll_up(&mut self, n: usize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll_back = (self.scroll_back + n).min(max);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(n);
    }

    #[cfg(test)]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

pub fn render(area: Rect, buf: &mut Buffer, state: &DebugLogState) {
    let mut title = vec![Span::styled(
        " Debug Log (Ctrl+D) ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if state.scroll_back > 0 {
        title.push(Span::styled(
            format!(" {} newer (Ctrl+Down) ", state.scroll_back),
            Style::default().fg(Color::Yellow),
        ));
    }
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(title));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 {
        return;
    }

    let end = state.lines.len().saturating_sub(state.scroll_back);
    let start = end.saturating_sub(inner.height as usize);
    let lines: Vec<Line> = state.lines[start..end]
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), level_style(l))))
        .collect();
    Paragraph::new(lines).render(inner, buf);
}

/// Color a formatted tracing line by its level.
fn level_style(line: &str) -> Style {
    let color = [
        ("ERROR", Color::Red),
        ("WARN", Color::Yellow),
        ("INFO", Color::Green),
        ("DEBUG", Color::DarkGray),
        ("TRACE", Color::DarkGray),
    ]
    .into_iter()
    .find(|(level, _)| line.split_whitespace().any(|word| word == *level))
    .map(|(_, color)| color)
    .unwrap_or(Color::White);
    Style::default().fg(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize, history: usize) -> DebugLogState {
        let source = LogBuffer::default();
        for i in 0..n {
            source.push(format!("line {}", i));
        }
        let mut state = DebugLogState::new(source, history);
        state.refresh();
        state
    }

    #[test]
    fn test_refresh_caps_history() {
        let state = filled(30, 10);
        assert_eq!(state.line_count(), 10);
        assert_eq!(state.lines[0], "line 20");
    }

    #[test]
    fn test_toggle_resets_scroll() {
        let mut state = filled(20, 100);
        state.toggle();
        state.scroll_up(5);
        assert_eq!(state.scroll_back, 5);
        state.toggle();
        state.toggle();
        assert!(state.visible);
        assert_eq!(state.scroll_back, 0);
    }

    #[test]
    fn test_scroll_clamps() {
        let mut state = filled(5, 100);
        state.scroll_up(100);
        assert_eq!(state.scroll_back, 4);
        state.scroll_down(100);
        assert_eq!(state.scroll_back, 0);
    }

    #[test]
    fn test_scrolled_back_view_holds_position() {
        let mut state = filled(10, 100);
        state.scroll_up(3);
        for i in 10..14 {
            state.source.push(format!("line {}", i));
        }
        state.refresh();
        assert_eq!(state.scroll_back, 7);

        state.scroll_down(100);
        state.source.push("line 14".to_string());
        state.refresh();
        assert_eq!(state.scroll_back, 0);
    }

    #[test]
    fn test_scrolled_back_view_clamps_after_trim() {
        let mut state = filled(5, 5);
        state.scroll_up(4);
        for i in 5..8 {
            state.source.push(format!("line {}", i));
        }
        state.refresh();
        assert_eq!(state.line_count(), 5);
        assert_eq!(state.scroll_back, 4);
    }

    #[test]
    fn test_title_counts_newer_lines() {
        let mut state = filled(10, 100);
        state.scroll_up(2);
        let area = Rect::new(0, 0, 60, 4);
        let mut buf = Buffer::empty(area);
        render(area, &mut buf, &state);
        let top: String = (0..area.width).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(top.contains("2 newer"), "title was {:?}", top);
        let bottom: String = (0..area.width).map(|x| buf[(x, 3)].symbol()).collect();
        assert!(bottom.starts_with("line 7"));
    }

    #[test]
    fn test_level_style() {
        assert_eq!(level_style("12:00  WARN slow").fg, Some(Color::Yellow));
        assert_eq!(level_style("12:00 ERROR boom").fg, Some(Color::Red));
        assert_eq!(level_style("plain text").fg, Some(Color::White));
    }
}
