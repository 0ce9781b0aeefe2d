//! Normalized error type for every backend and upload call

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// Message used when a failure carries no usable text of its own
pub(crate) const FALLBACK_MESSAGE: &str = "An unexpected error occurred.";

/// Closed classification of failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request never reached the server
    Network,
    /// Server or client rejected the input
    Validation,
    /// 401 / 403
    Authorization,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 429
    RateLimited,
    /// 5xx
    ServerUnavailable,
    /// Anything else, including local misconfiguration
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Network => "network",
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::RateLimited => "rate limited",
            Self::ServerUnavailable => "server unavailable",
            Self::Unexpected => "unexpected",
        };
        f.write_str(name)
    }
}

/// Raw cause kept alongside the normalized error
#[derive(Debug, Clone)]
pub enum Cause {
    /// Transport-level error from the HTTP client
    Transport(Arc<reqwest::Error>),
    /// Error response as received
    Response { status: u16, body: Option<Value> },
    /// Successful response whose envelope reported a failure
    Envelope(Value),
    /// Failure raised before any request was sent
    Local(String),
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Response { status, .. } => write!(f, "HTTP {status}"),
            Self::Envelope(body) => write!(f, "{body}"),
            Self::Local(message) => f.write_str(message),
        }
    }
}

/// The single error shape surfaced by the client
///
/// Built once at the normalization boundary; only read accessors are public.
/// `message` is never empty and `details`, when present, is never empty.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    details: Option<Vec<String>>,
    error_type: Option<String>,
    original: Option<Cause>,
}

impl ApiError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            kind,
            message,
            status: None,
            details: None,
            error_type: None,
            original: None,
        }
    }

    /// Input rejected on the client before any request was sent
    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(ErrorKind::Validation, message.clone()).with_original(Cause::Local(message))
    }

    pub(crate) fn with_status(mut self, status: Option<u16>) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn with_details(mut self, details: Option<Vec<String>>) -> Self {
        self.details = details.filter(|d| !d.is_empty());
        self
    }

    pub(crate) fn with_error_type(mut self, error_type: Option<String>) -> Self {
        self.error_type = error_type;
        self
    }

    pub(crate) fn with_original(mut self, original: Cause) -> Self {
        self.original = Some(original);
        self
    }

    /// Failure classification
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message, never empty
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Per-field validation messages
    pub fn details(&self) -> Option<&[String]> {
        self.details.as_deref()
    }

    /// Backend error type tag, e.g. `VALIDATION`
    pub fn error_type(&self) -> Option<&str> {
        self.error_type.as_deref()
    }

    /// Raw cause for callers that need more than the message
    pub fn original(&self) -> Option<&Cause> {
        self.original.as_ref()
    }

    /// Lines to show the user
    ///
    /// Validation errors with details show the details instead of the
    /// message; everything else shows the message followed by any details.
    pub fn display_lines(&self) -> Vec<String> {
        match (&self.kind, &self.details) {
            (ErrorKind::Validation, Some(details)) => details.clone(),
            (_, Some(details)) => std::iter::once(self.message.clone())
                .chain(details.iter().map(|d| format!("• {d}")))
                .collect(),
            (_, None) => vec![self.message.clone()],
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
