#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use melody_syncer::{
    error::SyncError,
    spotify::MetadataProvider,
    types::{PlaylistItem, SearchCandidate, SpotifyAlbum, SpotifyArtist, SpotifyTrack},
    youtube::{CredentialPool, ProviderReply, TrackResolver, VideoProvider},
};

pub const KEYS: [&str; 5] = ["key-1", "key-2", "key-3", "key-4", "key-5"];

pub fn pool() -> CredentialPool {
    CredentialPool::new(KEYS.iter().map(|k| k.to_string()).collect())
}

pub fn candidate(video_id: &str, title: &str, channel: &str) -> SearchCandidate {
    SearchCandidate {
        video_id: video_id.to_string(),
        title: title.to_string(),
        channel_title: channel.to_string(),
    }
}

pub fn spotify_track(id: &str, name: &str, artist: &str, album: &str, ms: u64) -> SpotifyTrack {
    SpotifyTrack {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        artists: vec![SpotifyArtist {
            name: artist.to_string(),
        }],
        album: Some(SpotifyAlbum {
            name: album.to_string(),
        }),
        duration_ms: ms,
    }
}

pub fn item(track: SpotifyTrack) -> PlaylistItem {
    PlaylistItem { track: Some(track) }
}

/// Scripted YouTube: search results per query string, durations per video,
/// and keys that get rejected.
#[derive(Default)]
pub struct FakeYouTube {
    pub results: HashMap<String, Vec<SearchCandidate>>,
    pub durations: HashMap<String, String>,
    pub reject_search: HashSet<String>,
    pub reject_videos: HashSet<String>,
    pub search_keys: Mutex<Vec<String>>,
    pub video_keys: Mutex<Vec<String>>,
}

impl FakeYouTube {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, terms: &str, candidates: Vec<SearchCandidate>) -> Self {
        self.results.insert(terms.to_string(), candidates);
        self
    }

    pub fn with_duration(mut self, video_id: &str, duration: &str) -> Self {
        self.durations
            .insert(video_id.to_string(), duration.to_string());
        self
    }

    pub fn rejecting_search(mut self, keys: &[&str]) -> Self {
        self.reject_search
            .extend(keys.iter().map(|k| k.to_string()));
        self
    }

    pub fn rejecting_videos(mut self, keys: &[&str]) -> Self {
        self.reject_videos
            .extend(keys.iter().map(|k| k.to_string()));
        self
    }

    pub fn search_keys(&self) -> Vec<String> {
        self.search_keys.lock().unwrap().clone()
    }

    pub fn video_keys(&self) -> Vec<String> {
        self.video_keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoProvider for FakeYouTube {
    async fn search(
        &self,
        terms: &str,
        credential: &str,
    ) -> Result<ProviderReply<Vec<SearchCandidate>>, SyncError> {
        self.search_keys.lock().unwrap().push(credential.to_string());
        if self.reject_search.contains(credential) {
            return Ok(ProviderReply::Rejected(403));
        }
        Ok(ProviderReply::Ok(
            self.results.get(terms).cloned().unwrap_or_default(),
        ))
    }

    async fn video_duration(
        &self,
        video_id: &str,
        credential: &str,
    ) -> Result<ProviderReply<String>, SyncError> {
        self.video_keys.lock().unwrap().push(credential.to_string());
        if self.reject_videos.contains(credential) {
            return Ok(ProviderReply::Rejected(403));
        }
        self.durations
            .get(video_id)
            .cloned()
            .map(ProviderReply::Ok)
            .ok_or_else(|| SyncError::Malformed(format!("no video {video_id}")))
    }
}

pub fn resolver(youtube: Arc<FakeYouTube>) -> TrackResolver {
    TrackResolver::new(youtube, pool())
}

/// Scripted Spotify: known tracks and playlists, everything else is missing.
#[derive(Default)]
pub struct FakeSpotify {
    pub tracks: HashMap<String, SpotifyTrack>,
    pub playlists: HashMap<String, Vec<PlaylistItem>>,
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, track: SpotifyTrack) -> Self {
        let id = track.id.clone().unwrap_or_default();
        self.tracks.insert(id, track);
        self
    }

    pub fn with_playlist(mut self, id: &str, items: Vec<PlaylistItem>) -> Self {
        self.playlists.insert(id.to_string(), items);
        self
    }
}

#[async_trait]
impl MetadataProvider for FakeSpotify {
    async fn track(&self, track_id: &str) -> Result<SpotifyTrack, SyncError> {
        self.tracks
            .get(track_id)
            .cloned()
            .ok_or_else(|| SyncError::NotFound(format!("track {track_id}")))
    }

    async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>, SyncError> {
        match self.playlists.get(playlist_id) {
            Some(items) if items.is_empty() => Err(SyncError::EmptyPlaylist),
            Some(items) => Ok(items.clone()),
            None => Err(SyncError::NotFound(format!("playlist {playlist_id}"))),
        }
    }
}
