use serde::{Deserialize, Serialize};
use tinylink_core::ShortId;

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// Absent when the form carried no `url` field at all; treated the
    /// same as an invalid URL.
    pub url: Option<String>,
}

/// Success body for the shorten endpoint. `short_url` is the bare
/// numeric identifier.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: ShortId,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
