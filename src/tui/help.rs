//! Help popup: keyboard shortcuts for each screen.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const POPUP_WIDTH: u16 = 72;
const POPUP_HEIGHT: u16 = 20;

struct Shortcut {
    key: &'static str,
    desc: &'static str,
}

struct Category {
    title: &'static str,
    shortcuts: &'static [Shortcut],
}

const CHAT_LIST: Category = Category {
    title: "CHAT LIST",
    shortcuts: &[
        Shortcut {
            key: "Up/Down j/k",
            desc: "Move selection",
        },
        Shortcut {
            key: "Enter",
            desc: "Open chat",
        },
        Shortcut {
            key: "1-9",
            desc: "Open chat by position",
        },
        Shortcut {
            key: "/",
            desc: "Search chats",
        },
        Shortcut {
            key: "Esc",
            desc: "Leave search box",
        },
        Shortcut {
            key: "r / e",
            desc: "Random Chat / Enter Room",
        },
        Shortcut {
            key: "q",
            desc: "Quit",
        },
    ],
};

const CONVERSATION: Category = Category {
    title: "CONVERSATION",
    shortcuts: &[
        Shortcut {
            key: "Enter",
            desc: "Send message",
        },
        Shortcut {
            key: "Alt+Enter",
            desc: "New line",
        },
        Shortcut {
            key: "Up/Down",
            desc: "Scroll messages",
        },
        Shortcut {
            key: "PgUp/PgDn",
            desc: "Scroll a page",
        },
        Shortcut {
            key: "Ctrl+End",
            desc: "Jump to newest",
        },
        Shortcut {
            key: "Ctrl+U",
            desc: "Clear input",
        },
        Shortcut {
            key: "Esc",
            desc: "Back to chats",
        },
    ],
};

const GLOBAL: Category = Category {
    title: "ANYWHERE",
    shortcuts: &[
        Shortcut {
            key: "F1",
            desc: "Toggle this help",
        },
        Shortcut {
            key: "Ctrl+D",
            desc: "Toggle debug log",
        },
        Shortcut {
            key: "Ctrl+C",
            desc: "Quit",
        },
    ],
};

/// Render the help popup centered over the current screen.
pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered_rect(
        POPUP_WIDTH.min(area.width.saturating_sub(2)),
        POPUP_HEIGHT.min(area.height.saturating_sub(2)),
        area,
    );

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " HELP ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            " Press any key to close ",
            Style::default().fg(Color::Gray),
        )));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let [left_col, right_col] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(inner);

    frame.render_widget(
        Paragraph::new(column_lines(&[&CHAT_LIST, &GLOBAL])),
        inset(left_col, 1),
    );
    frame.render_widget(
        Paragraph::new(column_lines(&[&CONVERSATION])),
        inset(right_col, 1),
    );
}

fn column_lines(categories: &[&Category]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, cat) in categories.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            cat.title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        for sc in cat.shortcuts {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<13}", sc.key), Style::default().fg(Color::Yellow)),
                Span::styled(sc.desc, Style::default().fg(Color::Gray)),
            ]));
        }
    }
    lines
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn inset(area: Rect, margin: u16) -> Rect {
    Rect::new(
        area.x + margin,
        area.y,
        area.width.saturating_sub(margin * 2),
        area.height,
    )
}
