use axum::http::header;
use axum::response::IntoResponse;

const HELP: &str = "\
MelodySyncer - Spotify to YouTube converter

Endpoints:
  GET /song?query={spotify_song_id}
  GET /playlist?query={spotify_playlist_id}&give_length=yes|no
  GET /analytics
  GET /health

YouTube API key:
  Pass your own key as ?youtubeAPIKEY=... or the X-YouTube-API-Key header.
  Without one the server uses its own keys, which share a daily quota.

Matching:
  +2  channel name contains \"Topic\" (auto-generated artist channel)
  +2  title contains \"Official Audio\" or \"Full Audio Song\"
  +5  video duration within 2 seconds of the Spotify track
  The highest score wins; ties go to the higher ranked search result.
";

pub async fn help() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        HELP,
    )
}
