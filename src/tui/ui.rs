//! UI rendering for the TUI

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, Screen};
use super::chat_list;
use super::conversation;
use super::debug_log::{self, DEBUG_LOG_HEIGHT};
use super::help;

const TITLE: &str = " Chat Mockup";

/// Main render function
pub fn render(frame: &mut Frame, app: &mut App) {
    let debug_height = if app.debug_log.visible {
        DEBUG_LOG_HEIGHT
    } else {
        0
    };

    // Layout: header (1 line) + screen + optional debug log + status bar (1 line)
    let [header_area, main_area, debug_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(debug_height),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(header_area, frame.buffer_mut(), app);

    match &mut app.screen {
        Screen::ChatList => chat_list::render(main_area, frame, &app.chat_list),
        Screen::Conversation(conv) => conversation::render(main_area, frame, conv),
    }

    if app.debug_log.visible {
        debug_log::render(debug_area, frame.buffer_mut(), &app.debug_log);
    }

    render_status(status_area, frame.buffer_mut(), app);

    if app.show_help {
        help::render_help_popup(frame);
    }
}

/// Render the header bar
fn render_header(area: Rect, buf: &mut Buffer, app: &App) {
    let title = Span::styled(
        TITLE,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let help_hint = Span::styled(" [F1] Help ", Style::default().fg(Color::Gray));
    let user = Span::styled(
        format!(" {} ", app.user_name),
        Style::default().fg(Color::Cyan),
    );

    let used = TITLE.width() + help_hint.width() + user.width();
    let padding = Span::raw(" ".repeat((area.width as usize).saturating_sub(used)));

    Paragraph::new(Line::from(vec![title, padding, help_hint, user]))
        .style(Style::default().bg(Color::DarkGray))
        .render(area, buf);
}

/// Render the status bar
fn render_status(area: Rect, buf: &mut Buffer, app: &App) {
    if let Some(ref msg) = app.status_message {
        let style = if app.status_is_error {
            Style::default().fg(Color::Red).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green).bg(Color::DarkGray)
        };
        Paragraph::new(Line::from(Span::styled(format!(" {} ", msg), style)))
            .style(Style::default().bg(Color::DarkGray))
            .render(area, buf);
        return;
    }

    let sep = Span::styled(" | ", Style::default().fg(Color::Gray));
    let screen = Span::styled(
        format!(" {}", app.screen.as_str()),
        Style::default().fg(Color::Yellow),
    );
    let hints = match &app.screen {
        Screen::ChatList if app.chat_list.search_focused => "type to filter, Esc: done",
        Screen::ChatList => "Enter: open  /: search  q: quit",
        Screen::Conversation(conv) if !conv.is_following() => "C-End: newest  Esc: back",
        Screen::Conversation(_) => "Enter: send  Esc: back",
    };

    let line = Line::from(vec![
        screen,
        sep.clone(),
        Span::styled(hints, Style::default().fg(Color::Cyan)),
        sep,
        Span::styled("C-d: debug log", Style::default().fg(Color::Gray)),
    ]);
    Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .render(area, buf);
}
