//! UI rendering modules

mod details;
mod events;
mod help;
mod layout;
mod popup;
mod records;
mod statusbar;
mod tabs;

use ratatui::prelude::*;

use crate::app::App;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let areas = layout::calculate_layout(frame.area());

    // Render main components
    tabs::render(frame, app, areas.tabs);
    records::render(frame, app, areas.records);
    details::render(frame, app, areas.details);
    events::render(frame, app, areas.events);
    statusbar::render(frame, app, areas.statusbar);

    // Popups, most urgent on top
    if app.show_help {
        help::render(frame);
    }
    if let Some(pending) = &app.pending_delete {
        popup::render_confirm(frame, pending);
    }
    if let Some(err) = &app.error {
        popup::render_error(frame, err);
    }
}
