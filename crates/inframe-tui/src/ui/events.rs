//! Event log panel widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

use crate::app::{App, EventLevel, EventLogEntry, Focus};
use crate::config;

/// Render the event log panel, newest first
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Events {
        config::focused_border_style()
    } else {
        config::unfocused_border_style()
    };

    let items: Vec<ListItem> = app
        .event_log
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|entry| ListItem::new(entry_line(entry)))
        .collect();

    let failures = app
        .event_log
        .iter()
        .filter(|e| matches!(e.level, EventLevel::Error(_)))
        .count();
    let title = if failures > 0 {
        format!(" Events ({failures} failed) ")
    } else {
        " Events ".to_string()
    };

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(list, area);
}

/// Timestamp, then the message; failures are tagged and coloured by kind
fn entry_line(entry: &EventLogEntry) -> Line<'_> {
    let time = Span::styled(
        entry.timestamp.format("%H:%M:%S ").to_string(),
        Style::default().fg(Color::DarkGray),
    );

    match entry.level {
        EventLevel::Info => Line::from(vec![time, Span::raw(entry.message.as_str())]),
        EventLevel::Success => Line::from(vec![
            time,
            Span::styled(entry.message.as_str(), Style::default().fg(Color::Green)),
        ]),
        EventLevel::Error(kind) => {
            let style = Style::default().fg(config::error_color(kind));
            Line::from(vec![
                time,
                Span::styled(format!("[{kind}] "), style.add_modifier(Modifier::BOLD)),
                Span::styled(entry.message.as_str(), style),
            ])
        }
    }
}
