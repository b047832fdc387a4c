//! API Response types
//!
//! The backend wraps most payloads in an envelope:
//! ```json
//! {
//!     "success": true,
//!     "code": 0,
//!     "message": "OK",
//!     "data": { ... }
//! }
//! ```
//! Some legacy endpoints answer with the bare payload instead; the client
//! accepts both.

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Explicit success flag (older endpoints)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Human-readable message
    #[serde(default, alias = "mensaje")]
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            success: Some(true),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Whether the envelope reports success
    ///
    /// Missing flags count as success; the HTTP status already filtered
    /// transport-level failures.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true) && self.code.is_none_or(|c| c == 0)
    }

    /// Convert into the payload, or an [`AppError`] carrying the backend message
    pub fn into_result(self) -> Result<Option<T>, AppError> {
        if self.is_success() {
            return Ok(self.data);
        }
        let code = self
            .code
            .and_then(|c| ErrorCode::try_from(c).ok())
            .unwrap_or(ErrorCode::Unknown);
        let message = if self.message.is_empty() {
            code.message().to_string()
        } else {
            self.message
        };
        Err(AppError {
            code,
            message,
            details: self.details,
        })
    }
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            success: Some(false),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}
