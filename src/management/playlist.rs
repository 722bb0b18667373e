use std::{collections::HashSet, sync::Arc};

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::{
    types::{PlaylistItem, PlaylistTrack, TrackOutcome, TrackQuery},
    youtube::TrackResolver,
};

/// Keeps the entries that carry both a track id and a name.
///
/// Local files and removed tracks come back without an id; they are dropped
/// without being reported. A track listed twice keeps its first position.
pub fn valid_tracks(items: Vec<PlaylistItem>) -> Vec<PlaylistTrack> {
    let mut seen = HashSet::new();

    items
        .into_iter()
        .filter_map(|item| item.track)
        .filter(|track| {
            track.id.as_deref().is_some_and(|id| !id.is_empty())
                && track.name.as_deref().is_some_and(|name| !name.is_empty())
        })
        .filter_map(|track| {
            let track_id = track.id.clone().unwrap_or_default();
            if !seen.insert(track_id.clone()) {
                return None;
            }
            Some(PlaylistTrack {
                track_id,
                query: TrackQuery::from(track),
            })
        })
        .collect()
}

/// Resolution outcome per Spotify track id, in playlist order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistUrlMap {
    entries: Vec<(String, TrackOutcome)>,
}

impl PlaylistUrlMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, track_id: &str) -> Option<&TrackOutcome> {
        self.entries
            .iter()
            .find(|(id, _)| id == track_id)
            .map(|(_, outcome)| outcome)
    }

    /// True when at least one entry ran out of credentials.
    pub fn is_exhausted(&self) -> bool {
        self.entries.iter().any(|(_, outcome)| outcome.is_exhausted())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrackOutcome)> {
        self.entries
            .iter()
            .map(|(id, outcome)| (id.as_str(), outcome))
    }

    pub fn urls(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(_, outcome)| outcome.display_url())
            .collect()
    }
}

/// Resolves every track of a playlist concurrently.
///
/// All playlists share one semaphore, which caps the number of tracks being
/// resolved at the same time across the whole process.
#[derive(Clone)]
pub struct PlaylistResolver {
    resolver: Arc<TrackResolver>,
    permits: Arc<Semaphore>,
}

impl PlaylistResolver {
    pub fn new(resolver: Arc<TrackResolver>, concurrency: usize) -> Self {
        Self {
            resolver,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    pub async fn resolve(&self, tracks: Vec<PlaylistTrack>, start_key: &str) -> PlaylistUrlMap {
        let mut handles = Vec::with_capacity(tracks.len());

        for track in tracks {
            let resolver = Arc::clone(&self.resolver);
            let permits = Arc::clone(&self.permits);
            let start_key = start_key.to_string();
            let track_id = track.track_id.clone();

            let handle = tokio::spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return TrackOutcome::Failed("resolver shut down".to_string());
                };

                match resolver.resolve(&track.query, &start_key).await {
                    Ok(result) => TrackOutcome::Resolved(result),
                    Err(e) => {
                        warn!(track_id = %track.track_id, error = %e, "playlist.track.failed");
                        TrackOutcome::Failed(e.to_string())
                    }
                }
            });
            handles.push((track_id, handle));
        }

        let mut entries = Vec::with_capacity(handles.len());
        for (track_id, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(track_id = %track_id, error = %e, "playlist.task.join");
                    TrackOutcome::Failed(format!("task join error: {e}"))
                }
            };
            entries.push((track_id, outcome));
        }

        debug!(tracks = entries.len(), "playlist.resolved");
        PlaylistUrlMap { entries }
    }
}
