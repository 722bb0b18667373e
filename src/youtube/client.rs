use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    config::YouTubeConfig,
    error::SyncError,
    types::{SearchCandidate, SearchResponse, VideoListResponse},
    youtube::{ProviderReply, VideoProvider},
};

/// YouTube Data API v3 client.
///
/// Any non-success status is reported as [`ProviderReply::Rejected`] so the
/// resolver can move on to the next key; transport failures are errors.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: Client,
    api_url: String,
    max_results: Option<u32>,
}

impl YouTubeClient {
    pub fn new(http: Client, cfg: &YouTubeConfig) -> Self {
        Self {
            http,
            api_url: cfg.api_url.clone(),
            max_results: cfg.max_results,
        }
    }
}

#[async_trait]
impl VideoProvider for YouTubeClient {
    async fn search(
        &self,
        terms: &str,
        credential: &str,
    ) -> Result<ProviderReply<Vec<SearchCandidate>>, SyncError> {
        let mut request = self
            .http
            .get(format!("{}/search", self.api_url))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", terms),
                ("key", credential),
            ]);
        if let Some(max) = self.max_results {
            request = request.query(&[("maxResults", max)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "youtube.search.rejected");
            return Ok(ProviderReply::Rejected(status.as_u16()));
        }

        let body = response.json::<SearchResponse>().await?;
        Ok(ProviderReply::Ok(
            body.items.into_iter().map(SearchCandidate::from).collect(),
        ))
    }

    async fn video_duration(
        &self,
        video_id: &str,
        credential: &str,
    ) -> Result<ProviderReply<String>, SyncError> {
        let response = self
            .http
            .get(format!("{}/videos", self.api_url))
            .query(&[
                ("part", "contentDetails"),
                ("id", video_id),
                ("key", credential),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), video_id, "youtube.videos.rejected");
            return Ok(ProviderReply::Rejected(status.as_u16()));
        }

        let body = response.json::<VideoListResponse>().await?;
        body.items
            .into_iter()
            .next()
            .map(|item| ProviderReply::Ok(item.content_details.duration))
            .ok_or_else(|| SyncError::Malformed(format!("no contentDetails for video {video_id}")))
    }
}
