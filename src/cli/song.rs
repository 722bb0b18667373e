use crate::{
    cli::spinner,
    config::AppConfig,
    error,
    server::AppState,
    success,
    types::{MatchResult, TrackQuery, YOUTUBE_WATCH_URL},
    utils, warning,
};

/// Resolves one track and prints the chosen video.
pub async fn song(cfg: &AppConfig, track_id: String, youtube_key: Option<String>) {
    let Some(track_id) = utils::normalize_id(Some(track_id.as_str())) else {
        error!("Please enter a valid Spotify song ID");
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

    let pb = spinner("Fetching track from Spotify...");
    let track = match state.metadata.track(&track_id).await {
        Ok(track) => track,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot fetch track {}. Err: {}", track_id, e);
        }
    };

    let query = TrackQuery::from(track);
    pb.set_message(format!("Searching YouTube for {}...", query.name));

    let result = state.resolver.resolve(&query, &start_key).await;
    pb.finish_and_clear();

    match result {
        Ok(MatchResult::Video(video_id)) => {
            success!("{} by {}", query.name, query.artist);
            println!("{YOUTUBE_WATCH_URL}{video_id}");
        }
        Ok(MatchResult::Placeholder) => warning!("No matching song found on YouTube"),
        Ok(MatchResult::Exhausted) => {
            error!("API Limit Exceeded for all YouTube API Keys. Try again later or pass --youtube-key")
        }
        Err(e) => error!("Cannot resolve {}. Err: {}", track_id, e),
    }
}
