use reqwest::{Client, StatusCode};

use crate::{
    error::SyncError,
    types::{PlaylistItem, PlaylistTracksResponse, SpotifyTrack},
};

/// Spotify caps playlists at 10,000 tracks, i.e. 100 pages of 100.
const MAX_PLAYLIST_PAGES: usize = 100;

pub async fn get_track(
    http: &Client,
    api_url: &str,
    token: &str,
    track_id: &str,
) -> Result<SpotifyTrack, SyncError> {
    let api_url = format!("{api_url}/tracks/{track_id}");
    let response = http.get(&api_url).bearer_auth(token).send().await?;

    match response.status() {
        status if status.is_success() => Ok(response.json::<SpotifyTrack>().await?),
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => {
            Err(SyncError::NotFound(format!("track {track_id}")))
        }
        status => Err(SyncError::Spotify(status.as_u16())),
    }
}

/// Every item of a playlist, following `next` links page by page.
pub async fn get_playlist_items(
    http: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
) -> Result<Vec<PlaylistItem>, SyncError> {
    let mut next = Some(format!("{api_url}/playlists/{playlist_id}/tracks"));
    let mut items = Vec::new();
    let mut pages = 0;

    while let Some(page_url) = next.take() {
        let response = http.get(&page_url).bearer_auth(token).send().await?;

        let page = match response.status() {
            status if status.is_success() => response.json::<PlaylistTracksResponse>().await?,
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => {
                return Err(SyncError::NotFound(format!("playlist {playlist_id}")));
            }
            status => return Err(SyncError::Spotify(status.as_u16())),
        };

        items.extend(page.items);
        pages += 1;
        if pages < MAX_PLAYLIST_PAGES {
            next = page.next;
        }
    }

    if items.is_empty() {
        return Err(SyncError::EmptyPlaylist);
    }

    Ok(items)
}
