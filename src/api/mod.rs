//! # API Module
//!
//! HTTP handlers of the relay. Every JSON answer carries a `status` field that
//! is either `"success"` or `"error"`; errors add a human readable `message`.
//!
//! ## Endpoints
//!
//! - [`song`] - `GET /song?query=<trackId>` converts one Spotify track
//! - [`playlist`] - `GET /playlist?query=<playlistId>&give_length=yes|no`
//!   converts every track of a playlist
//! - [`analytics`] - `GET /analytics` dumps the usage counters
//! - [`health`] - `GET /health` status and version
//! - [`help`] - `GET /help` plain-text usage notes
//!
//! The YouTube key a conversion starts with comes from the `youtubeAPIKEY`
//! query parameter, then the `X-YouTube-API-Key` header, then the first key of
//! the configured pool.

use axum::{
    Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

mod analytics;
mod health;
mod help;
mod playlist;
mod song;

pub use analytics::analytics;
pub use health::health;
pub use help::help;
pub use playlist::playlist;
pub use song::song;

pub const YOUTUBE_KEY_HEADER: &str = "X-YouTube-API-Key";
pub const CONVERSION_CACHE_CONTROL: &str = "public, max-age=300";

const EXHAUSTED_MESSAGE: &str = "API Limit Exceeded for all YouTube API Keys. Please try again later or enter your own YouTube API Key.";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("No matching song found on YouTube")]
    NoMatch,
    /// `length` is echoed back for playlists that asked for it.
    #[error("{}", EXHAUSTED_MESSAGE)]
    Exhausted { length: Option<usize> },
    #[error("No YouTube API key found")]
    NoCredentials,
    #[error("{0}")]
    Upstream(String),
    #[error("{}", UNEXPECTED_MESSAGE)]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::NoMatch => StatusCode::NOT_FOUND,
            ApiError::Exhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::NoCredentials | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let length = match &self {
            ApiError::Exhausted { length } => *length,
            _ => None,
        };
        let body = ErrorBody {
            status: "error",
            message: self.to_string(),
            length,
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// The key a caller asked for, before falling back to the pool.
fn requested_key(param: Option<&str>, headers: &HeaderMap) -> Option<String> {
    param
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .or_else(|| {
            headers
                .get(YOUTUBE_KEY_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.trim().to_string())
                .filter(|key| !key.is_empty())
        })
}
