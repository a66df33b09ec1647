//! Error type shared by every stage of the request pipeline.
//!
//! All failures, whether they happen while building a request, talking to the
//! network, or decoding a response, are reported as a single [`Error`] value
//! carrying an [`ErrorKind`], a numeric code and a message. Construction goes
//! through [`Error::new`] and the kind-specific helpers below so that codes
//! stay consistent across call sites.
//!
//! The response mapping functions ([`map_response`] and [`map_transport`])
//! turn the raw outcome of an HTTP exchange into either a JSON value or an
//! [`Error`].

use log::warn;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::executor::RawResponse;

/// Code used when a request is built without a usable access token.
pub const AUTH_ERROR_CODE: i32 = 100;
/// Code used when request values cannot be serialized.
pub const ENCODING_ERROR_CODE: i32 = 101;
/// Code used when no response was received at all.
pub const TRANSPORT_ERROR_CODE: i32 = 102;
/// Code used when a successful response does not contain valid JSON.
pub const DECODING_ERROR_CODE: i32 = 103;
/// Code used when a caller passes an argument the library cannot act on.
pub const INVALID_ARGUMENT_ERROR_CODE: i32 = 104;

/// The stage of the pipeline an [`Error`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or empty access token at build time.
    Auth,
    /// Request values could not be serialized.
    Encoding,
    /// The request never produced a response.
    Transport,
    /// The server answered with a non-2xx status.
    Http,
    /// A 2xx response body was not valid JSON of the expected shape.
    Decoding,
    /// A caller-side programming error, such as a zero page size.
    InvalidArgument,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Auth => "auth error",
            ErrorKind::Encoding => "encoding error",
            ErrorKind::Transport => "transport error",
            ErrorKind::Http => "http error",
            ErrorKind::Decoding => "decoding error",
            ErrorKind::InvalidArgument => "invalid argument",
        };
        write!(f, "{}", s)
    }
}

/// A failure anywhere in the request pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} ({code}): {message}")]
pub struct Error {
    kind: ErrorKind,
    code: i32,
    message: String,
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an error. Every other constructor funnels through here.
    pub fn new(kind: ErrorKind, code: i32, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, AUTH_ERROR_CODE, message)
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Encoding, ENCODING_ERROR_CODE, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, TRANSPORT_ERROR_CODE, message)
    }

    pub fn decoding(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decoding, DECODING_ERROR_CODE, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InvalidArgument,
            INVALID_ARGUMENT_ERROR_CODE,
            message,
        )
    }

    /// An HTTP error; `code` is the server-supplied status when available.
    pub fn http(code: i32, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Http, code, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Maps a failed send (no response received) onto a transport error.
pub fn map_transport(err: reqwest::Error) -> Error {
    Error::transport(err.to_string())
}

/// Maps a raw response onto its JSON payload or an [`Error`].
///
/// Successful responses with an empty body (for example `204 No Content` from
/// a mutating call) resolve to [`Value::Null`].
pub fn map_response(response: &RawResponse) -> Result<Value> {
    let status = response.status();

    if (200..300).contains(&status) {
        if response.body().iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        return serde_json::from_slice(response.body())
            .map_err(|e| Error::decoding(format!("malformed response: {}", e)));
    }

    let err = map_error_body(status, response.body());
    warn!("request failed with status {}: {}", status, err.message());
    Err(err)
}

fn map_error_body(status: u16, body: &[u8]) -> Error {
    let fallback = || {
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason());
        match reason {
            Some(reason) => Error::http(i32::from(status), format!("HTTP {} {}", status, reason)),
            None => Error::http(i32::from(status), format!("HTTP {}", status)),
        }
    };

    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        return fallback();
    };

    match json.get("error") {
        // Web API errors: {"error": {"status": 404, "message": "..."}}
        Some(Value::Object(detail)) => {
            let code = detail
                .get("status")
                .and_then(Value::as_i64)
                .and_then(|c| i32::try_from(c).ok())
                .unwrap_or(i32::from(status));
            match detail.get("message").and_then(Value::as_str) {
                Some(message) if !message.is_empty() => Error::http(code, message),
                _ => Error::http(code, fallback().message),
            }
        }
        // Accounts service errors: {"error": "invalid_client", "error_description": "..."}
        Some(Value::String(error)) => {
            let message = match json.get("error_description").and_then(Value::as_str) {
                Some(description) => format!("{}: {}", error, description),
                None => error.clone(),
            };
            Error::http(i32::from(status), message)
        }
        _ => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse::new(status, body.as_bytes().to_vec())
    }

    #[test]
    fn success_body_is_parsed() {
        let value = map_response(&raw(200, r#"{"id":"abc"}"#)).unwrap();
        assert_eq!(value["id"], "abc");
    }

    #[test]
    fn empty_success_body_is_null() {
        assert_eq!(map_response(&raw(204, "")).unwrap(), Value::Null);
        assert_eq!(map_response(&raw(200, "  \n")).unwrap(), Value::Null);
    }

    #[test]
    fn malformed_success_body_is_decoding_error() {
        let err = map_response(&raw(200, "{not json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
        assert_eq!(err.code(), DECODING_ERROR_CODE);
        assert!(err.message().starts_with("malformed response"));
    }

    #[test]
    fn web_api_error_body_uses_server_detail() {
        let err = map_response(&raw(
            404,
            r#"{"error":{"status":404,"message":"non existing id"}}"#,
        ))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(err.code(), 404);
        assert_eq!(err.message(), "non existing id");
    }

    #[test]
    fn accounts_error_body_is_folded_into_message() {
        let err = map_response(&raw(
            400,
            r#"{"error":"invalid_client","error_description":"Invalid client"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.code(), 400);
        assert_eq!(err.message(), "invalid_client: Invalid client");
    }

    #[test]
    fn unstructured_error_body_falls_back_to_status() {
        let err = map_response(&raw(502, "<html>bad gateway</html>")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(err.code(), 502);
        assert_eq!(err.message(), "HTTP 502 Bad Gateway");
    }

    #[test]
    fn display_includes_kind_and_code() {
        let err = Error::auth("missing access token");
        assert_eq!(err.to_string(), "auth error (100): missing access token");
    }
}
