//! Records displayed by the table

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cell::CellValue;

/// One row of domain data, keyed by column key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: String,
    #[serde(flatten)]
    cells: BTreeMap<String, CellValue>,
}

impl Record {
    /// Create an empty record with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Builder-style cell insertion
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: CellValue) -> Self {
        self.cells.insert(key.into(), value);
        self
    }

    /// Builder-style insertion that skips `None`
    #[must_use]
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<CellValue>) -> Self {
        if let Some(value) = value {
            self.cells.insert(key.into(), value);
        }
        self
    }

    /// Build a record from a JSON object
    ///
    /// The id is read from `id_key` (string or number). Returns `None` when
    /// the id is missing. Every other field becomes a cell; `null` fields are
    /// left out.
    pub fn from_json_object(object: &Map<String, Value>, id_key: &str) -> Option<Self> {
        let id = match object.get(id_key)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        let cells = object
            .iter()
            .filter(|(key, _)| key.as_str() != id_key)
            .filter_map(|(key, value)| CellValue::from_json(value).map(|cell| (key.clone(), cell)))
            .collect();

        Some(Self { id, cells })
    }

    /// Record id used for detail navigation
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Cell for a column key
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    /// All cells in key order
    pub fn cells(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(key, value)| (key.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_object() {
        let value = json!({
            "_id": "65f0c1",
            "name": "Acme",
            "logo": {"type": "image", "value": "https://cdn/acme.png"},
            "website": null
        });
        let record = Record::from_json_object(value.as_object().unwrap(), "_id").unwrap();

        assert_eq!(record.id(), "65f0c1");
        assert_eq!(record.get("name"), Some(&CellValue::string("Acme")));
        assert_eq!(record.get("logo"), Some(&CellValue::image("https://cdn/acme.png")));
        assert_eq!(record.get("website"), None);
        assert_eq!(record.get("_id"), None);
    }

    #[test]
    fn test_from_json_object_numeric_id() {
        let value = json!({"id": 42, "title": "x"});
        let record = Record::from_json_object(value.as_object().unwrap(), "id").unwrap();
        assert_eq!(record.id(), "42");
    }

    #[test]
    fn test_from_json_object_without_id() {
        let value = json!({"title": "x"});
        assert!(Record::from_json_object(value.as_object().unwrap(), "id").is_none());
    }

    #[test]
    fn test_deserialize_flattened() {
        let record: Record = serde_json::from_value(json!({
            "id": "7",
            "title": {"type": "text", "value": "Hello"},
            "views": 12
        }))
        .unwrap();

        assert_eq!(record.id(), "7");
        assert_eq!(record.get("title"), Some(&CellValue::text("Hello")));
        assert_eq!(record.get("views"), Some(&CellValue::number(12)));
    }
}
