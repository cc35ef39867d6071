//! Avatar badge: initials on a colored background.
//!
//! The terminal cannot show the hosted avatar images, so every avatar falls
//! back to the contact's initials.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Background colors avatars are picked from.
const PALETTE: [Color; 6] = [
    Color::Blue,
    Color::Magenta,
    Color::Green,
    Color::Cyan,
    Color::Red,
    Color::Yellow,
];

/// Up to two uppercase initials from the first two words of `name`.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// Stable background color for a name.
pub fn color_for(name: &str) -> Color {
    let seed = name
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    PALETTE[seed as usize % PALETTE.len()]
}

/// A four-column badge: " SP ".
pub fn badge(name: &str) -> Span<'static> {
    Span::styled(
        format!(" {:<2} ", initials(name)),
        Style::default()
            .fg(Color::Black)
            .bg(color_for(name))
            .add_modifier(Modifier::BOLD),
    )
}
