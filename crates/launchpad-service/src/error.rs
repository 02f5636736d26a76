//! API error types and responses.

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use launchpad_core::{IdError, LaunchpadError};
use launchpad_store::StoreError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Conflict - value already taken or invalid state transition.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The payment rail did not settle.
    #[error("payment failed: {0}")]
    PaymentFailed(String),

    /// The message cipher rejected its input.
    #[error("cipher error: {0}")]
    Cipher(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// External service error.
    #[error("external service error: {service} - {message}")]
    ExternalService {
        /// The provider that failed.
        service: String,
        /// Error message.
        message: String,
    },
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                msg.clone(),
                None,
            ),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone(), None),
            Self::PaymentFailed(msg) => (
                StatusCode::PAYMENT_REQUIRED,
                "payment_failed",
                msg.clone(),
                None,
            ),
            Self::Cipher(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "cipher_error",
                msg.clone(),
                None,
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            Self::ExternalService { service, message } => (
                StatusCode::BAD_GATEWAY,
                "external_service_error",
                message.clone(),
                Some(serde_json::json!({ "service": service })),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<LaunchpadError> for ApiError {
    fn from(err: LaunchpadError) -> Self {
        match err {
            LaunchpadError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found: {id}"))
            }
            LaunchpadError::Conflict(msg) => Self::Conflict(msg),
            LaunchpadError::PaymentFailed(msg) => Self::PaymentFailed(msg),
            LaunchpadError::Cipher(msg) => Self::Cipher(msg),
            LaunchpadError::Validation(msg) => Self::Validation(msg),
            LaunchpadError::Provider { service, message } => {
                Self::ExternalService { service, message }
            }
            LaunchpadError::Storage(msg) => Self::Internal(msg),
            LaunchpadError::Io(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        LaunchpadError::from(err).into()
    }
}

impl From<IdError> for ApiError {
    fn from(err: IdError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Validation(err.body_text())
    }
}
