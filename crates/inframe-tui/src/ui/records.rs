//! Record table widget

use inframe_table::{CellValue, RenderedCell, thumbnail_label};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::app::{App, Focus};
use crate::config;

/// Render the current screen's record table
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let table = &app.table;
    let columns = table.columns();

    let header = Row::new(columns.iter().map(|c| Cell::from(c.label.clone())))
        .style(config::header_style())
        .height(1);

    let rows: Vec<Row> = table
        .visible_records()
        .map(|record| {
            let cells = columns.iter().map(|column| {
                match table.render_cell(record, column) {
                    RenderedCell::Text(text) => Cell::from(text.into_owned())
                        .style(config::column_style(column.class_name.as_deref())),
                    RenderedCell::Thumbnail(url) => {
                        Cell::from(thumbnail_label(url, config::THUMBNAIL_WIDTH))
                            .style(config::thumbnail_style())
                    }
                    RenderedCell::Placeholder => {
                        Cell::from(inframe_table::PLACEHOLDER).style(config::placeholder_style())
                    }
                }
            });
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|column| {
            let holds_images = table
                .records()
                .iter()
                .any(|r| matches!(r.get(&column.key), Some(CellValue::Image(_))));
            if holds_images {
                Constraint::Length(config::THUMBNAIL_WIDTH as u16)
            } else {
                Constraint::Fill(1)
            }
        })
        .collect();

    let border_style = if app.focus == Focus::Records {
        config::focused_border_style()
    } else {
        config::unfocused_border_style()
    };

    let label = app.screen.label();
    let count = table.visible_len();
    let title = if app.search_active || !table.search().is_empty() {
        let query = table.search();
        format!(" {label} ({count}) /{query} ")
    } else {
        format!(" {label} ({count}) ")
    };

    let widget = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .row_highlight_style(config::selected_style())
        .highlight_symbol("▸ ");

    let mut state = TableState::default();
    if count > 0 {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(widget, area, &mut state);
}
