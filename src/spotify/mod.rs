//! # Spotify Integration Module
//!
//! Read-only access to the Spotify Web API: the metadata of a single track and
//! the items of a public playlist. Authentication uses the client-credentials
//! grant; the token is cached by [`auth::TokenManager`] and shared by all
//! requests.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - client-credentials token
//! - `GET /tracks/{id}` - track metadata
//! - `GET /playlists/{id}/tracks` - playlist items, paginated via `next`
//!
//! Higher layers depend on the [`MetadataProvider`] trait rather than on
//! [`SpotifyClient`] directly.

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::SpotifyConfig,
    error::SyncError,
    types::{PlaylistItem, SpotifyTrack},
};

pub mod auth;
pub mod tracks;

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn track(&self, track_id: &str) -> Result<SpotifyTrack, SyncError>;

    /// All items of a playlist; an empty playlist is [`SyncError::EmptyPlaylist`].
    async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>, SyncError>;
}

pub struct SpotifyClient {
    http: Client,
    cfg: SpotifyConfig,
    tokens: auth::TokenManager,
}

impl SpotifyClient {
    pub fn new(http: Client, cfg: &SpotifyConfig) -> Self {
        Self {
            http,
            cfg: cfg.clone(),
            tokens: auth::TokenManager::new(),
        }
    }

    async fn token(&self) -> Result<String, SyncError> {
        self.tokens.get_valid_token(&self.http, &self.cfg).await
    }
}

#[async_trait]
impl MetadataProvider for SpotifyClient {
    async fn track(&self, track_id: &str) -> Result<SpotifyTrack, SyncError> {
        let token = self.token().await?;
        tracks::get_track(&self.http, &self.cfg.api_url, &token, track_id).await
    }

    async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>, SyncError> {
        let token = self.token().await?;
        tracks::get_playlist_items(&self.http, &self.cfg.api_url, &token, playlist_id).await
    }
}
