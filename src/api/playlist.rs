use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    api::{ApiError, CONVERSION_CACHE_CONTROL, requested_key},
    error::SyncError,
    management::valid_tracks,
    server::AppState,
    types::AnalyticsCounters,
    utils,
};

#[derive(Debug, Deserialize)]
pub struct PlaylistParams {
    pub query: Option<String>,
    #[serde(rename = "youtubeAPIKEY")]
    pub youtube_api_key: Option<String>,
    pub give_length: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistResponse {
    pub status: &'static str,
    pub list: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

pub async fn playlist(
    State(state): State<AppState>,
    Query(params): Query<PlaylistParams>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let Some(playlist_id) = utils::normalize_id(params.query.as_deref()) else {
        return Err(ApiError::BadRequest(
            "Please enter a valid Spotify playlist ID".to_string(),
        ));
    };
    let give_length = params.give_length.as_deref() == Some("yes");

    let requested = requested_key(params.youtube_api_key.as_deref(), &headers);
    let start_key = state
        .resolver
        .credentials()
        .starting_key(requested.as_deref())
        .ok_or(ApiError::NoCredentials)?;

    info!(playlist_id = %playlist_id, "playlist.request");

    let items = state
        .metadata
        .playlist_items(&playlist_id)
        .await
        .map_err(playlist_error)?;

    let tracks = valid_tracks(items);
    if tracks.is_empty() {
        return Err(playlist_error(SyncError::NoValidTracks));
    }

    let urls = state.playlists.resolve(tracks, &start_key).await;

    // one exhausted track voids the whole playlist
    if urls.is_exhausted() {
        warn!(playlist_id = %playlist_id, "playlist.exhausted");
        return Err(ApiError::Exhausted {
            length: give_length.then_some(urls.len()),
        });
    }

    state.analytics.record(AnalyticsCounters::playlist(urls.len()));
    info!(playlist_id = %playlist_id, tracks = urls.len(), "playlist.resolved");

    let list = urls.urls();
    let body = PlaylistResponse {
        status: "success",
        length: give_length.then_some(list.len()),
        list,
    };
    Ok(([(header::CACHE_CONTROL, CONVERSION_CACHE_CONTROL)], Json(body)))
}

fn playlist_error(e: SyncError) -> ApiError {
    match e {
        SyncError::NotFound(_) => ApiError::NotFound(
            "Playlist not found. Please check if the playlist exists and is public.".to_string(),
        ),
        SyncError::EmptyPlaylist => ApiError::NotFound("This playlist is empty".to_string()),
        SyncError::NoValidTracks => {
            ApiError::NotFound("No valid songs found in playlist".to_string())
        }
        SyncError::SpotifyAuth(_) => {
            ApiError::Upstream("Failed to authenticate with Spotify".to_string())
        }
        SyncError::Spotify(_) => {
            ApiError::Upstream("Failed to fetch playlist from Spotify".to_string())
        }
        SyncError::Http(msg) => {
            ApiError::Upstream(format!("Network error while processing playlist: {msg}"))
        }
        other => {
            error!(error = %other, "playlist.failed");
            ApiError::Internal
        }
    }
}
