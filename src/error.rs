//! Error taxonomy shared by the resolver, the API clients and the relay.

use thiserror::Error;

/// A duration string whose numeric components could not be extracted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed duration {input:?}")]
pub struct DurationError {
    pub input: String,
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("config error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("spotify responded with status {0}")]
    Spotify(u16),
    #[error("spotify authentication failed: {0}")]
    SpotifyAuth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("this playlist is empty")]
    EmptyPlaylist,
    #[error("no valid songs found in playlist")]
    NoValidTracks,
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error(transparent)]
    Duration(#[from] DurationError),
    #[error("store error: {0}")]
    Store(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SyncError::Malformed(e.to_string())
        } else {
            SyncError::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::Malformed(e.to_string())
    }
}
