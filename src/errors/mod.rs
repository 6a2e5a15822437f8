//! Unified error handling with consistent API response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// User-safe message shown whenever the dashboard could not be assembled.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data.";

/// Error detail in the API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Consistent JSON envelope for all API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            data: Some(data),
            error: None,
        })
    }

    /// Wrap an error in the envelope.
    pub fn error(code: &str, message: &str) -> Json<Self> {
        Json(Self {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A remote collection fetch rejected. The only failure kind the
    /// dashboard recognizes; origin is kept for diagnostics only.
    #[error("Fetch of '{collection}' failed: {reason}")]
    Fetch {
        collection: &'static str,
        reason: String,
    },

    #[error("Dashboard unavailable")]
    DashboardUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a fetch failure for the named collection.
    pub fn fetch(collection: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            collection,
            reason: reason.to_string(),
        }
    }

    /// Check if this error is a collection fetch failure.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Fetch causes are logged where the dashboard build catches them.
            AppError::Fetch { .. } | AppError::DashboardUnavailable => (
                StatusCode::BAD_GATEWAY,
                "FETCH_FAILED",
                LOAD_FAILED_MESSAGE.to_string(),
            ),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()> {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message,
            }),
        };

        (status, Json(body)).into_response()
    }
}
