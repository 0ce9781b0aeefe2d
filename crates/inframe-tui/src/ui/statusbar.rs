//! Status bar widget

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, InputMode};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (mode, color) = match app.input_mode() {
        InputMode::Normal => ("NORMAL", Color::Green),
        InputMode::Search => ("SEARCH", Color::Yellow),
        InputMode::Confirm => ("CONFIRM", Color::Yellow),
        InputMode::Error => ("ERROR", Color::Red),
    };

    let keybindings = match app.input_mode() {
        InputMode::Search => "[type] Filter  [Ctrl-U] Clear  [Enter/Esc] Done",
        _ => "[j/k] Navigate  [Enter] Open  [/] Search  [r] Reload  [d] Delete  [?] Help  [q] Quit",
    };

    let status_line = Line::from(vec![
        Span::styled(format!(" {mode} "), Style::default().fg(Color::Black).bg(color)),
        Span::raw(" "),
        Span::styled(app.server_url(), Style::default().fg(Color::Cyan)),
        Span::raw("  │  "),
        Span::styled(keybindings, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}
