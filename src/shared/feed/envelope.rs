//! Response envelope
//!
//! Every backend body is wrapped as `{ "code": 1000, "message": "...", "result": ... }`.
//! Error bodies usually carry only `code` and `message`.

use serde::{Deserialize, Serialize};

/// Backend response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Backend status code, not the HTTP status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Human-readable message, mostly present on errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload
    pub fn ok(result: T) -> Self {
        Self {
            code: Some(1000),
            message: None,
            result: Some(result),
        }
    }

    /// Take the payload
    pub fn into_result(self) -> Option<T> {
        self.result
    }
}

/// Error-shaped body, parsed from non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}
