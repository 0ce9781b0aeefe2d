//! Column schema

use serde::{Deserialize, Serialize};

/// One displayable column of a record table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Key looked up in each record
    pub key: String,
    /// Header label
    pub label: String,
    /// Optional style hint for the renderer
    #[serde(default, rename = "className", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl ColumnSpec {
    /// Create a column without a style hint
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            class_name: None,
        }
    }

    /// Attach a style hint
    #[must_use]
    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_serde_key() {
        let column: ColumnSpec =
            serde_json::from_str(r#"{"key":"title","label":"Title","className":"bold"}"#)
                .unwrap();
        assert_eq!(column, ColumnSpec::new("title", "Title").class("bold"));

        let json = serde_json::to_string(&ColumnSpec::new("id", "ID")).unwrap();
        assert!(!json.contains("className"));
    }
}
