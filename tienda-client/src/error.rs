//! Client error types

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
///
/// Variants carrying a `String` hold the backend-supplied message, or an
/// empty string when the backend sent none.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with an error envelope
    #[error("API error {code}: {message}")]
    Api { code: ErrorCode, message: String },

    /// Authentication required or credentials rejected
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Local storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Backend-supplied message, if any
    pub fn backend_message(&self) -> Option<&str> {
        let msg = match self {
            ClientError::Api { message, .. }
            | ClientError::Unauthorized(message)
            | ClientError::Forbidden(message)
            | ClientError::NotFound(message)
            | ClientError::Validation(message)
            | ClientError::Internal(message) => message.as_str(),
            _ => return None,
        };
        (!msg.trim().is_empty()).then_some(msg)
    }

    /// Fill a missing backend message with an operation-specific fallback
    pub fn or_message(self, fallback: &str) -> Self {
        if self.backend_message().is_some() {
            return self;
        }
        match self {
            ClientError::Api { code, .. } => ClientError::Api {
                code,
                message: fallback.to_string(),
            },
            ClientError::Unauthorized(_) => ClientError::Unauthorized(fallback.to_string()),
            ClientError::Forbidden(_) => ClientError::Forbidden(fallback.to_string()),
            ClientError::NotFound(_) => ClientError::NotFound(fallback.to_string()),
            ClientError::Validation(_) => ClientError::Validation(fallback.to_string()),
            ClientError::Internal(_) => ClientError::Internal(fallback.to_string()),
            other => other,
        }
    }

    /// Text to show the user in an inline banner
    pub fn user_message(&self) -> String {
        if let Some(msg) = self.backend_message() {
            return msg.to_string();
        }
        match self {
            ClientError::Http(e) if e.is_timeout() => "El servidor tardó demasiado en responder".into(),
            ClientError::Http(_) => "No se pudo conectar con el servidor".into(),
            ClientError::Api { code, .. } => code.message().into(),
            ClientError::Unauthorized(_) => "Sesión expirada, vuelva a iniciar sesión".into(),
            ClientError::Forbidden(_) => "No tiene permisos para realizar esta acción".into(),
            ClientError::NotFound(_) => "Recurso no encontrado".into(),
            ClientError::Validation(_) => "Datos inválidos".into(),
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                "Respuesta inesperada del servidor".into()
            }
            ClientError::Storage(_) => "No se pudo guardar la información local".into(),
            ClientError::Internal(_) => "Error interno, intente nuevamente".into(),
        }
    }

    /// Error code this failure maps to
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            ClientError::Http(_) => ErrorCode::NetworkError,
            ClientError::Api { code, .. } => *code,
            ClientError::Unauthorized(_) => ErrorCode::NotAuthenticated,
            ClientError::Forbidden(_) => ErrorCode::PermissionDenied,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::InvalidRequest
            }
            ClientError::Storage(_) => ErrorCode::StorageError,
            ClientError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        ClientError::Api {
            code: err.code,
            message: err.message,
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::from(errors).into()
    }
}
