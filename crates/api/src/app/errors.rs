//! Consistent error responses.
//!
//! Every failure leaving the API has the stable shape `{"error": "..."}`
//! (plus structured hints where the contract calls for them). Store detail
//! never crosses the boundary: it is logged and replaced with a generic 500.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use noteforge_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input (400).
    #[error("{0}")]
    Validation(String),

    /// No usable bearer token on the request (401).
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Token invalid/expired, principal gone, or role/tenant mismatch (403).
    #[error("{0}")]
    Forbidden(&'static str),

    /// Absent resource, or one belonging to another tenant; the two are
    /// never distinguished (404).
    #[error("{0}")]
    NotFound(&'static str),

    /// Free-plan note cap hit (403 with an upgrade hint).
    #[error("note limit reached")]
    LimitReached,

    /// Duplicate email, repeated upgrade (400).
    #[error("{0}")]
    Conflict(String),

    /// Transient store failure; the client may retry (503).
    #[error("service unavailable")]
    Unavailable,

    /// Anything else from the store (500, detail suppressed).
    #[error(transparent)]
    Store(StoreError),

    /// Internal invariant failure (500, detail suppressed).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Not found"),
            StoreError::DuplicateEmail => ApiError::conflict("User already exists"),
            StoreError::AlreadyPro => ApiError::conflict("Tenant is already on Pro plan"),
            StoreError::LimitReached => ApiError::LimitReached,
            other if other.is_unavailable() => ApiError::Unavailable,
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => json_error(StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, msg),
            ApiError::LimitReached => (
                StatusCode::FORBIDDEN,
                axum::Json(json!({
                    "error": "Note limit reached for free plan. Upgrade to Pro for unlimited notes.",
                    "upgradeRequired": true,
                })),
            )
                .into_response(),
            ApiError::Conflict(msg) => json_error(StatusCode::BAD_REQUEST, msg),
            ApiError::Unavailable => json_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable",
            ),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "store failure");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
