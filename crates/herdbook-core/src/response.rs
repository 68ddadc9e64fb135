//! Response envelope shared by every endpoint.
//!
//! Wire shape: `{success, message, data?, err?}`. `data` carries the payload
//! on success; `err` carries structured diagnostics (field-level validation
//! detail, or the internal error chain on 500s).

use serde::Serialize;

/// The `{success, message, data?, err?}` envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize = serde_json::Value> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<serde_json::Value>,
}

impl<T: Serialize> Envelope<T> {
    /// Success envelope with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            err: None,
        }
    }
}

impl Envelope<serde_json::Value> {
    /// Success envelope with no payload.
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            err: None,
        }
    }

    /// Failure envelope with no diagnostics.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            err: None,
        }
    }

    /// Failure envelope carrying structured diagnostics in `err`.
    pub fn error_with(message: impl Into<String>, err: serde_json::Value) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            err: Some(err),
        }
    }
}
