//! TUI configuration

use inframe_client::ErrorKind;
use ratatui::style::{Color, Modifier, Style};

/// Characters reserved for an image thumbnail cell
pub const THUMBNAIL_WIDTH: usize = 18;

/// Style for a column's class hint
pub fn column_style(class_name: Option<&str>) -> Style {
    match class_name {
        Some("bold") => Style::default().add_modifier(Modifier::BOLD),
        Some("muted") => Style::default().fg(Color::DarkGray),
        Some("accent") => Style::default().fg(Color::Magenta),
        Some("mono") => Style::default().fg(Color::Cyan),
        _ => Style::default(),
    }
}

/// Thumbnail cell style
pub fn thumbnail_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Placeholder cell style
pub fn placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Popup colour for an error kind
pub fn error_color(kind: ErrorKind) -> Color {
    match kind {
        ErrorKind::Validation | ErrorKind::Conflict => Color::Yellow,
        ErrorKind::Network | ErrorKind::ServerUnavailable | ErrorKind::RateLimited => {
            Color::Magenta
        }
        _ => Color::Red,
    }
}

/// Header style
pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Selected row style
pub fn selected_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Active tab style
pub fn active_tab_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style for focused panel
pub fn focused_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Border style for unfocused panel
pub fn unfocused_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_class_is_plain() {
        assert_eq!(column_style(Some("sparkly")), Style::default());
        assert_eq!(column_style(None), Style::default());
        assert_ne!(column_style(Some("bold")), Style::default());
    }
}
