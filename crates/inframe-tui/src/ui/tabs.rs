//! Resource tab bar

use inframe_api::ResourceKind;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::config;

/// Render one tab per resource, the current screen highlighted
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::with_capacity(ResourceKind::ALL.len() * 2);
    for (i, kind) in ResourceKind::ALL.iter().enumerate() {
        let text = format!(" {} {} ", i + 1, kind.label());
        let style = if *kind == app.screen {
            config::active_tab_style()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
