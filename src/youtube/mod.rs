//! # YouTube Module
//!
//! Everything needed to turn Spotify track metadata into a YouTube video id:
//!
//! - [`credentials`] - the fixed pool of API keys and its rotation rule
//! - [`client`] - the YouTube Data API v3 client (`search` and `videos`)
//! - [`resolver`] - the scoring heuristic that picks the best candidate
//!
//! The resolver only sees the [`VideoProvider`] trait, so tests can drive it
//! with canned search results and durations.

use async_trait::async_trait;

use crate::{error::SyncError, types::SearchCandidate};

pub mod client;
pub mod credentials;
pub mod resolver;

pub use client::YouTubeClient;
pub use credentials::{CredentialPool, Rotation};
pub use resolver::{TrackResolver, score_candidate, select_best};

/// Answer of a provider call made with one particular credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderReply<T> {
    Ok(T),
    /// The provider refused the credential (quota exceeded, key invalid, ...).
    Rejected(u16),
}

#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Searches videos for `terms`, in provider ranking order.
    async fn search(
        &self,
        terms: &str,
        credential: &str,
    ) -> Result<ProviderReply<Vec<SearchCandidate>>, SyncError>;

    /// Raw `contentDetails.duration` of a video (`PT#H#M#S`).
    async fn video_duration(
        &self,
        video_id: &str,
        credential: &str,
    ) -> Result<ProviderReply<String>, SyncError>;
}
