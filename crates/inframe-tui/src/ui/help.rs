//! Help popup widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::layout;

/// Render the help popup
pub fn render(frame: &mut Frame) {
    let help_text = r"
  Navigation
  ──────────
  j/↓ k/↑   Move down / up
  g G       Jump to first / last
  Tab 1-6   Switch resource
  f         Switch panel focus
  Enter     Open record
  Esc       Close popup / details

  Records
  ───────
  /         Search every column
  Ctrl-U    Clear search
  r         Reload
  d         Delete record

  General
  ───────
  ?         Toggle help
  q         Quit
";

    let popup_area = layout::centered(frame.area(), 50, 24);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
