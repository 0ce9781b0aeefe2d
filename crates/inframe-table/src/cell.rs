//! Cell values and their rendered forms

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content of one table cell
///
/// Serialized as `{"type": "text" | "image", "value": ...}` for the tagged
/// variants and as a bare JSON scalar otherwise. The table renders by variant
/// and never inspects the content to guess a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CellRepr", into = "CellRepr")]
pub enum CellValue {
    /// Plain text, truncated on display
    Text(String),
    /// Image reference rendered as a thumbnail
    Image(String),
    /// Untagged scalar
    Scalar(Scalar),
}

/// Untagged scalar cell content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
enum Tagged {
    Text(String),
    Image(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Tagged(Tagged),
    Scalar(Scalar),
}

impl From<CellRepr> for CellValue {
    fn from(repr: CellRepr) -> Self {
        match repr {
            CellRepr::Tagged(Tagged::Text(value)) => Self::Text(value),
            CellRepr::Tagged(Tagged::Image(url)) => Self::Image(url),
            CellRepr::Scalar(scalar) => Self::Scalar(scalar),
        }
    }
}

impl From<CellValue> for CellRepr {
    fn from(cell: CellValue) -> Self {
        match cell {
            CellValue::Text(value) => Self::Tagged(Tagged::Text(value)),
            CellValue::Image(url) => Self::Tagged(Tagged::Image(url)),
            CellValue::Scalar(scalar) => Self::Scalar(scalar),
        }
    }
}

impl CellValue {
    /// Tagged text cell
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Tagged image cell
    pub fn image(url: impl Into<String>) -> Self {
        Self::Image(url.into())
    }

    /// Untagged string scalar
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    /// Untagged numeric scalar
    pub fn number(value: impl Into<serde_json::Number>) -> Self {
        Self::Scalar(Scalar::Number(value.into()))
    }

    /// Convert loosely-shaped JSON into a cell
    ///
    /// `null` yields `None` so the column renders its placeholder. Arrays of
    /// scalars are joined with `", "`; any other object or array is kept as
    /// compact JSON text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Scalar(Scalar::Bool(*b))),
            Value::Number(n) => Some(Self::Scalar(Scalar::Number(n.clone()))),
            Value::String(s) => Some(Self::string(s.clone())),
            Value::Object(_) => match serde_json::from_value::<Tagged>(value.clone()) {
                Ok(tagged) => Some(CellRepr::Tagged(tagged).into()),
                Err(_) => Some(Self::string(value.to_string())),
            },
            Value::Array(items) => {
                let parts: Option<Vec<String>> = items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        Value::Bool(b) => Some(b.to_string()),
                        _ => None,
                    })
                    .collect();
                Some(Self::string(
                    parts.map_or_else(|| value.to_string(), |parts| parts.join(", ")),
                ))
            }
        }
    }

    /// Text searched by the free-text filter
    pub fn search_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(value) => Cow::Borrowed(value),
            Self::Image(url) => Cow::Borrowed(url),
            Self::Scalar(Scalar::String(s)) => Cow::Borrowed(s),
            Self::Scalar(scalar) => Cow::Owned(scalar.to_string()),
        }
    }
}

/// A cell after the rendering policy has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedCell<'a> {
    /// Possibly truncated text
    Text(Cow<'a, str>),
    /// Image URL to show as a fixed-size thumbnail
    Thumbnail(&'a str),
    /// Value missing from the record
    Placeholder,
}

/// Fixed-width terminal label standing in for an image thumbnail
///
/// Shows the file name of the URL behind a marker, cut or padded to exactly
/// `width` characters.
pub fn thumbnail_label(url: &str, width: usize) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("image");

    let label: String = format!("▣ {name}").chars().take(width).collect();
    format!("{label:<width$}")
}
