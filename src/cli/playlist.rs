use tabled::Table;

use crate::{
    cli::spinner,
    config::AppConfig,
    error, info,
    management::valid_tracks,
    server::AppState,
    success,
    types::{PlaylistTableRow, TrackOutcome},
    utils, warning,
};

/// Resolves a playlist and prints one row per track.
pub async fn playlist(cfg: &AppConfig, playlist_id: String, youtube_key: Option<String>) {
    let Some(playlist_id) = utils::normalize_id(Some(playlist_id.as_str())) else {
        error!("Please enter a valid Spotify playlist ID");
    };

    let state = match AppState::from_config(cfg) {
        Ok(state) => state,
        Err(e) => error!("Cannot set up clients. Err: {}", e),
    };

    let Some(start_key) = state
        .resolver
        .credentials()
        .starting_key(youtube_key.as_deref())
    else {
        error!("No YouTube API key found. Set YOUTUBE_API_KEY or pass --youtube-key");
    };

    let pb = spinner("Fetching playlist from Spotify...");
    let items = match state.metadata.playlist_items(&playlist_id).await {
        Ok(items) => items,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot fetch playlist {}. Err: {}", playlist_id, e);
        }
    };

    let tracks = valid_tracks(items);
    if tracks.is_empty() {
        pb.finish_and_clear();
        warning!("No valid songs found in playlist");
        return;
    }

    pb.set_message(format!("Resolving {} tracks on YouTube...", tracks.len()));
    let urls = state.playlists.resolve(tracks, &start_key).await;
    pb.finish_and_clear();

    if urls.is_exhausted() {
        error!("API Limit Exceeded for all YouTube API Keys. Try again later or pass --youtube-key");
    }

    let failed = urls
        .iter()
        .filter(|(_, outcome)| matches!(outcome, TrackOutcome::Failed(_)))
        .count();

    let rows: Vec<PlaylistTableRow> = urls
        .iter()
        .enumerate()
        .map(|(i, (track_id, outcome))| PlaylistTableRow {
            position: i + 1,
            track_id: track_id.to_string(),
            youtube: outcome.display_url(),
        })
        .collect();

    println!("{}", Table::new(rows));

    if failed > 0 {
        warning!("{} of {} tracks could not be resolved", failed, urls.len());
    } else {
        success!("Resolved {} tracks", urls.len());
    }
    info!("Playlist {} done", playlist_id);
}
