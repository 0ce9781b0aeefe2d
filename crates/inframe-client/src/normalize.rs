//! Failure classification
//!
//! Every failed backend or upload call ends up here. Classification is
//! ordered and the first matching rule wins:
//!
//! 1. no response at all → fixed connectivity message, no status
//! 2. the backend's own validation failure → details become the message
//! 3. any other response → fixed per-status message unless the backend
//!    supplied one
//! 4. the request never left the client → "unexpected error" framing

use std::sync::Arc;

use inframe_api::{Details, ErrorBody};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Cause, ErrorKind, Result};

/// Message for requests that got no response
pub const NETWORK_MESSAGE: &str =
    "Network error: unable to reach the server. Please check your connection.";

/// Message when an envelope reports failure without saying why
pub const ENVELOPE_FAILURE_MESSAGE: &str = "Request failed.";

/// A failed call before classification
#[derive(Debug)]
pub enum Failure {
    /// Request was sent but nothing came back
    NoResponse(Cause),
    /// A response arrived with an error status
    Response { status: u16, body: Option<Value> },
    /// Request never left the client
    Local(Cause),
}

impl Failure {
    /// Failure raised before sending, from a plain message
    pub fn local(message: impl Into<String>) -> Self {
        Self::Local(Cause::Local(message.into()))
    }

    /// Classify a transport error by where it happened
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let builder = err.is_builder();
        let cause = Cause::Transport(Arc::new(err));
        if builder {
            Self::Local(cause)
        } else {
            Self::NoResponse(cause)
        }
    }
}

/// Fixed message and kind for an HTTP status
pub fn status_message(status: u16) -> (ErrorKind, String) {
    let (kind, message) = match status {
        400 => (ErrorKind::Validation, "Invalid request. Please check your input."),
        401 => (ErrorKind::Authorization, "Unauthorized. Please log in again."),
        403 => (
            ErrorKind::Authorization,
            "Forbidden. You do not have permission to perform this action.",
        ),
        404 => (ErrorKind::NotFound, "Resource not found."),
        409 => (
            ErrorKind::Conflict,
            "Conflict. The resource already exists or was modified.",
        ),
        422 => (ErrorKind::Validation, "Validation failed. Please check your input."),
        429 => (ErrorKind::RateLimited, "Too many requests. Please try again later."),
        500 | 502 | 503 => (
            ErrorKind::ServerUnavailable,
            "Server unavailable. Please try again later.",
        ),
        500..=599 => {
            return (
                ErrorKind::ServerUnavailable,
                format!("Server error (status {status})."),
            );
        }
        _ => {
            return (ErrorKind::Unexpected, format!("Server error (status {status})."));
        }
    };
    (kind, message.to_string())
}

/// Turn any failure into the normalized error
pub fn normalize(failure: Failure) -> ApiError {
    match failure {
        Failure::NoResponse(cause) => {
            ApiError::new(ErrorKind::Network, NETWORK_MESSAGE).with_original(cause)
        }
        Failure::Response { status, body } => {
            let parsed = body.as_ref().map(ErrorBody::from_value).unwrap_or_default();
            let cause = Cause::Response { status, body };

            if let Some(err) = validation_error(&parsed, Some(status), || cause.clone()) {
                return err;
            }

            let (kind, fixed) = status_message(status);
            let message = parsed.backend_message().map_or(fixed, str::to_string);
            ApiError::new(kind, message)
                .with_status(Some(status))
                .with_details(parsed.details.map(Details::into_vec))
                .with_error_type(parsed.error_type)
                .with_original(cause)
        }
        Failure::Local(cause) => {
            ApiError::new(ErrorKind::Unexpected, format!("An unexpected error occurred: {cause}"))
                .with_original(cause)
        }
    }
}

/// Rule 2: the backend's validation envelope
///
/// The details payload doubles as the message. A single detail becomes the
/// message verbatim; several are joined with `", "`.
fn validation_error(
    body: &ErrorBody,
    status: Option<u16>,
    cause: impl FnOnce() -> Cause,
) -> Option<ApiError> {
    if !body.is_validation_failure() {
        return None;
    }
    let details = body.details.clone()?.into_vec();
    if details.is_empty() {
        return None;
    }
    Some(
        ApiError::new(ErrorKind::Validation, details.join(", "))
            .with_status(status)
            .with_details(Some(details))
            .with_error_type(body.error_type.clone())
            .with_original(cause()),
    )
}

/// Unwrap the backend's success envelope
///
/// - `success: true` with non-null `data` yields `data`
/// - `success: false` fails with the envelope's message (validation
///   envelopes are classified as in [`normalize`])
/// - no `success` flag, or no data, yields the body itself
///
/// # Errors
/// Returns an error if the envelope reports failure or the payload does not
/// match `T`.
pub fn unwrap_envelope<T: DeserializeOwned>(body: Value) -> Result<T> {
    let success = body.get("success").and_then(Value::as_bool);

    match success {
        Some(false) => {
            let parsed = ErrorBody::from_value(&body);
            if let Some(err) = validation_error(&parsed, None, || Cause::Envelope(body.clone())) {
                return Err(err);
            }
            let message = parsed
                .backend_message()
                .unwrap_or(ENVELOPE_FAILURE_MESSAGE)
                .to_string();
            Err(ApiError::new(ErrorKind::Unexpected, message)
                .with_details(parsed.details.map(Details::into_vec))
                .with_error_type(parsed.error_type)
                .with_original(Cause::Envelope(body)))
        }
        Some(true) => match body.get("data") {
            Some(data) if !data.is_null() => decode(data.clone()),
            _ => decode(body),
        },
        None => decode(body),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| normalize(Failure::local(format!("invalid response body: {e}"))))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(status: u16, body: Value) -> ApiError {
        normalize(Failure::Response {
            status,
            body: Some(body),
        })
    }

    #[test]
    fn test_no_response() {
        let err = normalize(Failure::NoResponse(Cause::Local("connection refused".into())));
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.message(), NETWORK_MESSAGE);
        assert!(err.status().is_none());
        assert!(matches!(err.original(), Some(Cause::Local(_))));
    }

    #[test]
    fn test_validation_envelope() {
        let err = response(
            422,
            json!({
                "success": false,
                "errorType": "VALIDATION",
                "details": ["Path `email` is required."]
            }),
        );

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Path `email` is required.");
        assert_eq!(err.details(), Some(&["Path `email` is required.".to_string()][..]));
        assert_eq!(err.error_type(), Some("VALIDATION"));
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_validation_scalar_details_wrapped() {
        let err = response(
            400,
            json!({"success": false, "errorType": "VALIDATION", "details": "name is required"}),
        );
        assert_eq!(err.details(), Some(&["name is required".to_string()][..]));
        assert_eq!(err.message(), "name is required");
    }

    #[test]
    fn test_validation_many_details_joined() {
        let err = response(
            422,
            json!({"success": false, "errorType": "VALIDATION", "details": ["a", "b"]}),
        );
        assert_eq!(err.message(), "a, b");
        assert_eq!(err.display_lines(), vec!["a", "b"]);
    }

    #[test]
    fn test_validation_needs_all_three_markers() {
        let err = response(422, json!({"errorType": "VALIDATION", "details": ["x"]}));
        assert_eq!(err.message(), "Validation failed. Please check your input.");
        assert_eq!(err.details(), Some(&["x".to_string()][..]));
    }

    #[test]
    fn test_empty_validation_details_fall_through() {
        let err = response(
            422,
            json!({"success": false, "errorType": "VALIDATION", "details": []}),
        );
        assert_eq!(err.message(), "Validation failed. Please check your input.");
        assert!(err.details().is_none());
    }

    #[test]
    fn test_not_found_without_body() {
        let err = normalize(Failure::Response {
            status: 404,
            body: None,
        });
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Resource not found.");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_status_table() {
        let cases = [
            (400, ErrorKind::Validation),
            (401, ErrorKind::Authorization),
            (403, ErrorKind::Authorization),
            (404, ErrorKind::NotFound),
            (409, ErrorKind::Conflict),
            (422, ErrorKind::Validation),
            (429, ErrorKind::RateLimited),
            (500, ErrorKind::ServerUnavailable),
            (502, ErrorKind::ServerUnavailable),
            (503, ErrorKind::ServerUnavailable),
            (504, ErrorKind::ServerUnavailable),
            (418, ErrorKind::Unexpected),
        ];
        for (status, kind) in cases {
            assert_eq!(status_message(status).0, kind, "status {status}");
        }
        assert_eq!(status_message(418).1, "Server error (status 418).");
        assert_eq!(status_message(502).1, "Server unavailable. Please try again later.");
    }

    #[test]
    fn test_backend_message_preferred() {
        let err = response(409, json!({"success": false, "message": "Email already registered"}));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "Email already registered");

        let err = response(500, json!({"error": "Mongo timeout", "details": ["db"]}));
        assert_eq!(err.message(), "Mongo timeout");
        assert_eq!(err.details(), Some(&["db".to_string()][..]));
    }

    #[test]
    fn test_backend_message_survives_odd_fields() {
        let err = response(
            409,
            json!({
                "success": false,
                "message": "Email already registered",
                "details": [{"path": "email"}]
            }),
        );
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "Email already registered");
        assert!(err.details().is_none());

        let err = response(400, json!({"message": "Bad slug", "error": {"code": 11000}}));
        assert_eq!(err.message(), "Bad slug");
    }

    #[test]
    fn test_validation_details_from_objects() {
        let err = response(
            422,
            json!({
                "success": false,
                "errorType": "VALIDATION",
                "details": [{"path": "email", "message": "Path `email` is required."}]
            }),
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Path `email` is required.");
    }

    #[test]
    fn test_non_json_body_uses_fixed_message() {
        let err = response(502, Value::String("<html>Bad Gateway</html>".into()));
        assert_eq!(err.message(), "Server unavailable. Please try again later.");
        assert!(matches!(
            err.original(),
            Some(Cause::Response { status: 502, body: Some(Value::String(_)) })
        ));
    }

    #[test]
    fn test_local_failure() {
        let err = normalize(Failure::local("upload preset is not configured"));
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(
            err.message(),
            "An unexpected error occurred: upload preset is not configured"
        );
        assert!(err.status().is_none());
    }

    #[test]
    fn test_unwrap_success_data() {
        let names: Vec<String> =
            unwrap_envelope(json!({"success": true, "data": ["a", "b"]})).unwrap();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_unwrap_failure_message() {
        let err = unwrap_envelope::<Value>(json!({"success": false, "message": "Not allowed"}))
            .unwrap_err();
        assert_eq!(err.message(), "Not allowed");
        assert!(matches!(err.original(), Some(Cause::Envelope(_))));

        let err = unwrap_envelope::<Value>(json!({"success": false})).unwrap_err();
        assert_eq!(err.message(), ENVELOPE_FAILURE_MESSAGE);
    }

    #[test]
    fn test_unwrap_validation_envelope() {
        let err = unwrap_envelope::<Value>(json!({
            "success": false,
            "errorType": "VALIDATION",
            "details": ["Path `name` is required."]
        }))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Path `name` is required.");
        assert!(err.status().is_none());
    }

    #[test]
    fn test_unwrap_passes_through_plain_body() {
        let body = json!({"name": "Acme"});
        let value: Value = unwrap_envelope(body.clone()).unwrap();
        assert_eq!(value, body);

        let body = json!({"success": true, "message": "Deleted"});
        let value: Value = unwrap_envelope(body.clone()).unwrap();
        assert_eq!(value, body);
    }

    #[test]
    fn test_unwrap_decode_error_is_unexpected() {
        let err = unwrap_envelope::<Vec<String>>(json!({"success": true, "data": 5})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err.message().starts_with("An unexpected error occurred: invalid response body"));
    }
}
