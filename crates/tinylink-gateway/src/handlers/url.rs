use crate::error::{AppError, Result};
use crate::model::{ErrorResponse, ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::{Form, Json};
use tinylink_core::{ShortId, ShortenerError};

pub async fn shorten_handler(
    State(state): State<AppState>,
    Form(request): Form<ShortenRequest>,
) -> Result<Json<ShortenResponse>> {
    let url = request.url.ok_or(AppError::InvalidUrl)?;

    let record = state
        .shortener()
        .shorten(&url)
        .await
        .map_err(|err| match err {
            ShortenerError::InvalidUrl(_) => AppError::InvalidUrl,
            ShortenerError::Storage(message) => AppError::Internal(message),
        })?;

    Ok(Json(ShortenResponse {
        original_url: record.original_url,
        short_url: record.id,
    }))
}

pub async fn resolve_handler(
    Path(shorturl): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // Anything that is not a positive decimal integer can never have
    // been assigned, so it maps to the same not-found response.
    let id: ShortId = shorturl.parse().map_err(|_| AppError::NotFound)?;

    let record = state
        .shortener()
        .resolve(id)
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?
        .ok_or(AppError::NotFound)?;

    redirect(&record.original_url)
}

pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse { error: "Not Found" }),
    )
}

/// A plain 302 redirect. Axum's `Redirect` helpers emit 303/307, while
/// this API promises 302.
fn redirect(location: &str) -> Result<Response> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, location)
        .body(axum::body::Body::empty())
        .map_err(|err| AppError::Internal(err.to_string()))
}
