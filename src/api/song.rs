use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    api::{ApiError, CONVERSION_CACHE_CONTROL, requested_key},
    error::SyncError,
    server::AppState,
    types::{AnalyticsCounters, MatchResult, TrackQuery, YOUTUBE_WATCH_URL},
    utils,
};

#[derive(Debug, Deserialize)]
pub struct SongParams {
    pub query: Option<String>,
    #[serde(rename = "youtubeAPIKEY")]
    pub youtube_api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SongResponse {
    pub status: &'static str,
    pub url: String,
}

pub async fn song(
    State(state): State<AppState>,
    Query(params): Query<SongParams>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let Some(track_id) = utils::normalize_id(params.query.as_deref()) else {
        return Err(ApiError::BadRequest(
            "Please enter a valid Spotify song ID".to_string(),
        ));
    };

    let requested = requested_key(params.youtube_api_key.as_deref(), &headers);
    let start_key = state
        .resolver
        .credentials()
        .starting_key(requested.as_deref())
        .ok_or(ApiError::NoCredentials)?;

    info!(track_id = %track_id, "song.request");

    let track = state.metadata.track(&track_id).await.map_err(song_error)?;
    let query = TrackQuery::from(track);

    match state
        .resolver
        .resolve(&query, &start_key)
        .await
        .map_err(song_error)?
    {
        MatchResult::Video(video_id) => {
            state.analytics.record(AnalyticsCounters::song());
            info!(track_id = %track_id, video_id = %video_id, "song.resolved");
            let body = SongResponse {
                status: "success",
                url: format!("{YOUTUBE_WATCH_URL}{video_id}"),
            };
            Ok(([(header::CACHE_CONTROL, CONVERSION_CACHE_CONTROL)], Json(body)))
        }
        MatchResult::Placeholder => Err(ApiError::NoMatch),
        MatchResult::Exhausted => Err(ApiError::Exhausted { length: None }),
    }
}

fn song_error(e: SyncError) -> ApiError {
    match e {
        SyncError::NotFound(_) | SyncError::Spotify(_) => ApiError::NotFound(
            "Could not fetch song information from Spotify. Please check if the song ID is valid."
                .to_string(),
        ),
        SyncError::SpotifyAuth(_) => {
            ApiError::Upstream("Failed to authenticate with Spotify".to_string())
        }
        SyncError::Http(msg) => {
            ApiError::Upstream(format!("Network error while fetching data: {msg}"))
        }
        other => {
            error!(error = %other, "song.failed");
            ApiError::Internal
        }
    }
}
