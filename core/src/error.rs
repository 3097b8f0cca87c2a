//! Error types for the 3taps API client.
//!
//! # Design
//! `Validation` and `MissingParameter` are raised before any request leaves
//! the client. `RequestFailed` and `ResponseDecode` are raised after exactly
//! one round-trip; nothing is retried. `Transport` wraps whatever the
//! injected transport reports when it cannot produce a response at all.

/// Errors returned by `Client` operations.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// A supplied parameter does not satisfy its semantic type.
    #[error("invalid value for `{field}`: {rule}")]
    Validation { field: String, rule: &'static str },

    /// A required parameter (or the at-least-one-field rule) was not met.
    #[error("{operation}: {detail}")]
    MissingParameter {
        operation: &'static str,
        detail: &'static str,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} {status_text}")]
    RequestFailed {
        status: u16,
        status_text: String,
        body: String,
    },

    /// A 2xx response body was not valid JSON.
    #[error("response is not valid JSON: {0}")]
    ResponseDecode(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// True for errors raised before any network I/O was attempted.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            ApiError::Validation { .. }
                | ApiError::MissingParameter { .. }
                | ApiError::Serialization(_)
        )
    }
}
