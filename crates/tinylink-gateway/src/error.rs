use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced by the HTTP handlers.
///
/// `InvalidUrl` and `NotFound` are contractual responses: a 200 status
/// with a JSON error body, exactly as clients of this API expect. Only
/// `Internal` maps to an HTTP error status.
pub enum AppError {
    /// The shorten input failed validation: malformed, disallowed
    /// scheme, or unresolvable host.
    InvalidUrl,
    /// The identifier has no stored record.
    NotFound,
    /// A storage failure leaked through the service layer.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidUrl => {
                (StatusCode::OK, Json(ErrorResponse { error: "invalid url" })).into_response()
            }
            AppError::NotFound => (
                StatusCode::OK,
                Json(ErrorResponse {
                    error: "Short URL not found",
                }),
            )
                .into_response(),
            AppError::Internal(message) => {
                error!(error = %message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "internal server error",
                    }),
                )
                    .into_response()
            }
        }
    }
}
