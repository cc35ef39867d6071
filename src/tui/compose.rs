//! Compose box: attachment toolbar, text input and send button.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::input::TextInput;

/// Height of the compose box: 1 border + 1 toolbar + 1 input + 1 border = 4 lines.
pub const COMPOSE_HEIGHT: u16 = 4;

const SEND_LABEL: &str = "[ Send \u{27A4} ]";

/// Render the compose box into the given area.
///
/// The input always holds focus while a conversation is open, so the
/// terminal cursor is placed in it.
pub fn render(area: Rect, frame: &mut Frame, input: &TextInput) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let toolbar_area = Rect::new(inner.x, inner.y, inner.width, 1);
    render_toolbar(toolbar_area, frame.buffer_mut());

    if inner.height < 2 {
        return;
    }
    let row = Rect::new(inner.x, inner.y + 1, inner.width, 1);
    let send_width = (SEND_LABEL.width() as u16 + 1).min(row.width);
    let input_area = Rect::new(row.x, row.y, row.width - send_width, 1);
    let send_area = Rect::new(row.x + input_area.width, row.y, send_width, 1);

    // Leading space before the text.
    let text_width = (input_area.width as usize).saturating_sub(1);
    let display = input.display(text_width);
    render_input(input_area, frame.buffer_mut(), input, &display.visible);
    render_send_button(send_area, frame.buffer_mut(), !input.is_blank());

    if text_width > 0 {
        frame.set_cursor_position((
            input_area.x + 1 + display.cursor_column as u16,
            input_area.y,
        ));
    }
}

/// Attachment, image and voice buttons. They are decorative.
fn render_toolbar(area: Rect, buf: &mut Buffer) {
    let line = Line::from(vec![Span::styled(
        " \u{1F4CE} Attach   \u{1F5BC} Image   \u{1F3A4} Voice",
        Style::default().fg(Color::DarkGray),
    )]);
    Paragraph::new(line).render(area, buf);
}

fn render_input(area: Rect, buf: &mut Buffer, input: &TextInput, visible: &str) {
    let line = if input.is_empty() {
        let placeholder: String = " Type a message..."
            .chars()
            .take(area.width as usize)
            .collect();
        Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {}", visible),
            Style::default().fg(Color::White),
        ))
    };
    Paragraph::new(line).render(area, buf);
}

/// Send button, dimmed while there is nothing to send.
fn render_send_button(area: Rect, buf: &mut Buffer, enabled: bool) {
    let style = if enabled {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Paragraph::new(Line::from(Span::styled(SEND_LABEL, style))).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(input: &TextInput) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(40, COMPOSE_HEIGHT)).unwrap();
        terminal
            .draw(|frame| render(frame.area(), frame, input))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn send_cell_style(buf: &Buffer) -> Style {
        // "[ Send" starts right after the input; find the 'S'.
        let y = 2;
        let x = (0..buf.area.width)
            .find(|&x| buf[(x, y)].symbol() == "S")
            .unwrap();
        buf[(x, y)].style()
    }

    #[test]
    fn test_send_disabled_when_blank() {
        let mut input = TextInput::default();
        input.insert_char(' ');
        let buf = draw(&input);
        assert_eq!(send_cell_style(&buf).fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_send_enabled_with_text() {
        let mut input = TextInput::default();
        input.insert_char('x');
        let buf = draw(&input);
        assert_eq!(send_cell_style(&buf).fg, Some(Color::Cyan));
    }
}
