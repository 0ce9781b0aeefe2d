//! Backend error bodies

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validation details: the backend sends either one string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Details {
    One(String),
    Many(Vec<String>),
}

impl Details {
    /// Read details leniently
    ///
    /// Keeps string entries and the `message` of object entries; anything
    /// else is dropped. `None` when nothing usable remains.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(detail) => Some(Self::One(detail.clone())),
            Value::Array(items) => {
                let details: Vec<String> = items.iter().filter_map(detail_text).collect();
                (!details.is_empty()).then_some(Self::Many(details))
            }
            Value::Object(_) => detail_text(value).map(Self::One),
            _ => None,
        }
    }

    /// Details as an ordered list, wrapping a single value
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(detail) => vec![detail],
            Self::Many(details) => details,
        }
    }
}

fn detail_text(item: &Value) -> Option<String> {
    match item {
        Value::String(detail) => Some(detail.clone()),
        Value::Object(fields) => fields.get("message").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Loosely-typed error body, every field optional
///
/// Error responses come in several shapes (envelope, `{error}`, plain text),
/// so each field is read on its own and a field of an unexpected type is
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub error_type: Option<String>,
    pub details: Option<Details>,
}

impl ErrorBody {
    /// Read the known fields of an error body
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            success: value.get("success").and_then(Value::as_bool),
            message: text("message"),
            error: text("error"),
            error_type: text("errorType"),
            details: value.get("details").and_then(Details::from_value),
        }
    }

    /// Whether the body is the backend's own validation failure
    pub fn is_validation_failure(&self) -> bool {
        self.success == Some(false)
            && self.error_type.as_deref() == Some("VALIDATION")
            && self.details.is_some()
    }

    /// Backend-supplied message, preferring `message` over `error`
    pub fn backend_message(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|m| !m.is_empty())
    }
}
