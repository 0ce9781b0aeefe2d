//! Error and confirmation popups

use inframe_client::ApiError;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::layout;
use crate::app::PendingDelete;
use crate::config;

/// Render a failed action until it is dismissed
pub fn render_error(frame: &mut Frame, err: &ApiError) {
    let color = config::error_color(err.kind());

    let mut lines: Vec<Line> = err
        .display_lines()
        .into_iter()
        .map(Line::from)
        .collect();
    if let Some(status) = err.status() {
        lines.push(Line::default());
        lines.push(Line::styled(
            format!("HTTP {status}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::default());
    lines.push(Line::styled(
        "[Enter] Dismiss",
        Style::default().fg(Color::DarkGray),
    ));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup_area = layout::centered(frame.area(), 60, height);
    frame.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {} ", err.kind()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}

/// Ask before deleting a record
pub fn render_confirm(frame: &mut Frame, pending: &PendingDelete) {
    let popup_area = layout::centered(frame.area(), 44, 5);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(format!("Delete {} {}?", pending.kind.label(), pending.id)),
        Line::default(),
        Line::styled("[y] Delete  [n] Cancel", Style::default().fg(Color::DarkGray)),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(paragraph, popup_area);
}
