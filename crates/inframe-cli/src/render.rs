//! Plain-text rendering of record tables

use inframe_table::{PLACEHOLDER, RecordTable, RenderedCell, thumbnail_label};

/// Characters reserved for an image cell
const THUMBNAIL_WIDTH: usize = 18;

/// Column separator
const GAP: &str = "  ";

/// Render the visible rows of `table` with the id as the first column
pub fn format_table(table: &RecordTable) -> String {
    let columns = table.columns();

    let mut header = vec!["ID".to_string()];
    header.extend(columns.iter().map(|c| c.label.clone()));

    let mut rows = vec![header];
    for record in table.visible_records() {
        let mut row = vec![record.id().to_string()];
        row.extend(columns.iter().map(|column| {
            match table.render_cell(record, column) {
                RenderedCell::Text(text) => text.replace('\n', " "),
                RenderedCell::Thumbnail(url) => thumbnail_label(url, THUMBNAIL_WIDTH),
                RenderedCell::Placeholder => PLACEHOLDER.to_string(),
            }
        }));
        rows.push(row);
    }

    let mut widths = vec![0; columns.len() + 1];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join(GAP).trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use inframe_table::{CellValue, ColumnSpec, Record};

    use super::*;

    fn table() -> RecordTable {
        let mut table = RecordTable::new(
            vec![
                ColumnSpec::new("logo", "Logo"),
                ColumnSpec::new("name", "Company"),
            ],
            "/dashboard/partners",
        );
        table.set_records(vec![
            Record::new("1")
                .with("logo", CellValue::image("https://cdn.example/acme.png"))
                .with("name", CellValue::text("Acme Studios")),
            Record::new("22").with("name", CellValue::text("Pixel Forge")),
        ]);
        table
    }

    #[test]
    fn test_columns_are_aligned() {
        let out = format_table(&table());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  Logo"));
        assert!(lines[1].contains("▣ acme.png"));
        assert!(lines[2].starts_with("22  -"));
        let column = lines[0].find("Company").unwrap();
        assert_eq!(
            lines[2].chars().skip(column).collect::<String>(),
            "Pixel Forge"
        );
    }

    #[test]
    fn test_only_visible_rows() {
        let mut table = table();
        table.set_search("pixel");

        let out = format_table(&table);

        assert_eq!(out.lines().count(), 2);
        assert!(!out.contains("Acme"));
    }
}
