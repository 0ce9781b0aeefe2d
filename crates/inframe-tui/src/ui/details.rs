//! Record details panel widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use serde_json::Value;

use crate::app::{App, Focus};
use crate::config;

/// Render the record details panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Details {
        config::focused_border_style()
    } else {
        config::unfocused_border_style()
    };

    let title = match app.routes.current() {
        Some(route) if app.detail.is_some() => format!(" {route} "),
        _ => " Details ".to_string(),
    };

    let content = if let Some(detail) = &app.detail {
        format_details(&detail.value)
    } else if let Some(record) = app.selected_record() {
        let mut lines: Vec<String> = record
            .cells()
            .map(|(key, cell)| format!("{key}: {}", cell.search_text()))
            .collect();
        lines.push(String::new());
        lines.push("Press Enter to open the record".to_string());
        lines.join("\n")
    } else {
        "No record selected".to_string()
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Format a record's JSON as one `key: value` line per field
fn format_details(value: &Value) -> String {
    let Value::Object(fields) = value else {
        return value.to_string();
    };

    fields
        .iter()
        .filter(|(key, _)| !key.starts_with("__"))
        .map(|(key, field)| match field {
            Value::Null => format!("{key}: -"),
            Value::String(s) => format!("{key}: {s}"),
            Value::Array(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_string))
                    .collect();
                format!("{key}: {}", items.join(", "))
            }
            other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_format_details() {
        let text = format_details(&json!({
            "_id": "b1",
            "__v": 0,
            "title": "Open Day",
            "tags": ["events", "campus"],
            "cover": null
        }));

        assert!(text.contains("title: Open Day"));
        assert!(text.contains("tags: events, campus"));
        assert!(text.contains("cover: -"));
        assert!(!text.contains("__v"));
    }

    #[test]
    fn test_format_non_object() {
        assert_eq!(format_details(&json!("plain")), "\"plain\"");
    }
}
