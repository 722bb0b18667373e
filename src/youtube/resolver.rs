use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::SyncError,
    types::{MatchResult, ScoredCandidate, SearchCandidate, TrackQuery},
    utils,
    youtube::{CredentialPool, ProviderReply, Rotation, VideoProvider},
};

const TOPIC_CHANNEL_POINTS: i32 = 2;
const OFFICIAL_TITLE_POINTS: i32 = 2;
const DURATION_MATCH_POINTS: i32 = 5;
pub const DURATION_TOLERANCE_MS: u64 = 2_000;

const OFFICIAL_TITLE_MARKERS: [&str; 2] = ["Official Audio", "Full Audio Song"];

/// Scores one search result against the track we are looking for.
///
/// Auto-generated artist channels end in "Topic"; audio uploads usually say
/// so in the title; a duration within [`DURATION_TOLERANCE_MS`] rules out live
/// and extended versions.
pub fn score_candidate(candidate: &SearchCandidate, video_ms: u64, target_ms: u64) -> i32 {
    let mut score = 0;

    if candidate.channel_title.contains("Topic") {
        score += TOPIC_CHANNEL_POINTS;
    }

    if OFFICIAL_TITLE_MARKERS
        .iter()
        .any(|marker| candidate.title.contains(marker))
    {
        score += OFFICIAL_TITLE_POINTS;
    }

    if utils::duration_gap(video_ms, target_ms) <= DURATION_TOLERANCE_MS {
        score += DURATION_MATCH_POINTS;
    }

    score
}

/// Picks the winner among scored candidates, in provider order.
///
/// Only a strictly higher score replaces the current best, so ties go to the
/// earlier result. When nothing scored, the first result is taken; when there
/// are no results, [`MatchResult::Placeholder`].
pub fn select_best(scored: &[ScoredCandidate]) -> MatchResult {
    let mut best: Option<&ScoredCandidate> = None;
    let mut best_score = 0;

    for entry in scored {
        if entry.score > best_score {
            best_score = entry.score;
            best = Some(entry);
        }
    }

    match best.or_else(|| scored.first()) {
        Some(entry) => MatchResult::Video(entry.candidate.video_id.clone()),
        None => MatchResult::Placeholder,
    }
}

/// Maps Spotify track metadata onto the most plausible YouTube video.
///
/// Costs one search plus one `videos` lookup per candidate, awaited one after
/// another. Rejected credentials are replaced by the next pooled key for the
/// rest of the resolution.
#[derive(Clone)]
pub struct TrackResolver {
    provider: Arc<dyn VideoProvider>,
    credentials: CredentialPool,
}

impl TrackResolver {
    pub fn new(provider: Arc<dyn VideoProvider>, credentials: CredentialPool) -> Self {
        Self {
            provider,
            credentials,
        }
    }

    pub fn credentials(&self) -> &CredentialPool {
        &self.credentials
    }

    pub async fn resolve(
        &self,
        query: &TrackQuery,
        start_key: &str,
    ) -> Result<MatchResult, SyncError> {
        let terms = query.search_terms();
        let mut key = start_key.to_string();

        let candidates = loop {
            match self.provider.search(&terms, &key).await? {
                ProviderReply::Ok(candidates) => break candidates,
                ProviderReply::Rejected(status) => {
                    if !self.rotate(&mut key, status) {
                        return Ok(MatchResult::Exhausted);
                    }
                }
            }
        };

        debug!(track = %query.name, candidates = candidates.len(), "resolver.search");

        let mut scored = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let Some(video_ms) = self.video_duration(&candidate.video_id, &mut key).await? else {
                return Ok(MatchResult::Exhausted);
            };

            let score = score_candidate(&candidate, video_ms, query.duration_ms);
            debug!(video_id = %candidate.video_id, score, video_ms, "resolver.score");
            scored.push(ScoredCandidate {
                candidate,
                duration_ms: video_ms,
                score,
            });
        }

        Ok(select_best(&scored))
    }

    /// Duration of `video_id` in milliseconds, or `None` once every key has
    /// been rejected.
    async fn video_duration(
        &self,
        video_id: &str,
        key: &mut String,
    ) -> Result<Option<u64>, SyncError> {
        loop {
            match self.provider.video_duration(video_id, key).await? {
                ProviderReply::Ok(raw) => return Ok(Some(utils::parse_iso_duration(&raw)?)),
                ProviderReply::Rejected(status) => {
                    if !self.rotate(key, status) {
                        return Ok(None);
                    }
                }
            }
        }
    }

    fn rotate(&self, key: &mut String, status: u16) -> bool {
        let slot = self.credentials.position(key);
        match self.credentials.next_after(key) {
            Rotation::Next(next) => {
                warn!(status, ?slot, "youtube.credential.rotate");
                *key = next;
                true
            }
            Rotation::Exhausted => {
                warn!(status, ?slot, "youtube.credential.exhausted");
                false
            }
        }
    }
}
