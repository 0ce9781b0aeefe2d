//! Free-text filtering and word truncation

use std::borrow::Cow;

use crate::record::Record;

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Whether a record's id or any of its cells contains `needle`
///
/// `needle` must already be lowercased. Matching is a case-insensitive
/// substring test against the id and each cell's search text.
pub fn matches_search(record: &Record, needle: &str) -> bool {
    record.id().to_lowercase().contains(needle)
        || record
            .cells()
            .any(|(_, cell)| cell.search_text().to_lowercase().contains(needle))
}

/// Indices of the records matching `search`, in their original order
///
/// Blank search text keeps every record. Other text is matched as typed,
/// surrounding whitespace included.
pub fn filter_records(records: &[Record], search: &str) -> Vec<usize> {
    if search.trim().is_empty() {
        return (0..records.len()).collect();
    }
    let needle = search.to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_search(record, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Cut `text` to at most `limit` words
///
/// Longer text keeps its first `limit` whitespace-separated words joined by
/// single spaces, followed by [`ELLIPSIS`]. Text within the limit is returned
/// as is.
pub fn truncate_words(text: &str, limit: usize) -> Cow<'_, str> {
    let mut words = text.split_whitespace();
    let kept: Vec<&str> = words.by_ref().take(limit).collect();

    if words.next().is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = kept.join(" ");
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    fn records() -> Vec<Record> {
        vec![
            Record::new("1")
                .with("name", CellValue::text("Campus Tour"))
                .with("cover", CellValue::image("https://cdn/tour.jpg")),
            Record::new("2")
                .with("name", CellValue::text("Design Week"))
                .with("year", CellValue::number(2024)),
            Record::new("3").with("name", CellValue::string("Annual Showcase")),
        ]
    }

    #[test]
    fn test_empty_search_keeps_order() {
        assert_eq!(filter_records(&records(), ""), vec![0, 1, 2]);
        assert_eq!(filter_records(&records(), "   "), vec![0, 1, 2]);
    }

    #[test]
    fn test_text_match_is_case_insensitive() {
        assert_eq!(filter_records(&records(), "DESIGN"), vec![1]);
    }

    #[test]
    fn test_scalar_and_image_match() {
        assert_eq!(filter_records(&records(), "2024"), vec![1]);
        assert_eq!(filter_records(&records(), "tour.jpg"), vec![0]);
        assert_eq!(filter_records(&records(), "showcase"), vec![2]);
    }

    #[test]
    fn test_any_cell_matches_in_original_order() {
        assert_eq!(filter_records(&records(), "n"), vec![0, 1, 2]);
        assert!(filter_records(&records(), "zzz").is_empty());
    }

    #[test]
    fn test_id_matches() {
        let records = vec![
            Record::new("64f1c0ffee").with("name", CellValue::text("Acme")),
            Record::new("42").with("name", CellValue::text("Pixel Forge")),
        ];
        assert_eq!(filter_records(&records, "42"), vec![1]);
        assert_eq!(filter_records(&records, "64F1C0"), vec![0]);
    }

    #[test]
    fn test_whitespace_is_part_of_query() {
        let records = vec![
            Record::new("1").with("name", CellValue::text("Lighthouse")),
            Record::new("2").with("name", CellValue::text("Boat house")),
        ];
        assert_eq!(filter_records(&records, " house"), vec![1]);
        assert_eq!(filter_records(&records, "house"), vec![0, 1]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let all = records();
        for search in ["", "de", "tour", "2024", "a", "nothing"] {
            let first: Vec<Record> = filter_records(&all, search)
                .into_iter()
                .map(|i| all[i].clone())
                .collect();
            let second: Vec<Record> = filter_records(&first, search)
                .into_iter()
                .map(|i| first[i].clone())
                .collect();
            assert_eq!(first, second, "search {search:?}");
        }
    }

    #[test]
    fn test_truncate_long_text() {
        let text = (1..=25).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let out = truncate_words(&text, 20);

        assert!(out.ends_with(ELLIPSIS));
        let body = out.trim_end_matches(ELLIPSIS);
        assert_eq!(body.split_whitespace().count(), 20);
        assert!(body.ends_with("w20"));
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        let text = (1..=20).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        assert!(matches!(truncate_words(&text, 20), Cow::Borrowed(s) if s == text));
        assert_eq!(truncate_words("  spaced   out ", 20), "  spaced   out ");
    }

    #[test]
    fn test_truncate_zero_limit() {
        assert_eq!(truncate_words("one two", 0), "...");
        assert_eq!(truncate_words("", 0), "");
    }
}
