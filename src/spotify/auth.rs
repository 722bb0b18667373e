use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{config::SpotifyConfig, error::SyncError, types::Token};

/// Seconds before the advertised expiry at which a token is considered stale.
const EXPIRY_BUFFER_SECS: u64 = 120;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Caches the client-credentials token shared by every Spotify call.
#[derive(Debug, Default)]
pub struct TokenManager {
    token: Mutex<Option<Token>>,
}

impl TokenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token, fetching a new one when it is missing or
    /// about to expire.
    pub async fn get_valid_token(
        &self,
        http: &Client,
        cfg: &SpotifyConfig,
    ) -> Result<String, SyncError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if !is_expired(token, Utc::now().timestamp() as u64) {
                return Ok(token.access_token.clone());
            }
        }

        let token = request_token(http, cfg).await?;
        debug!(expires_in = token.expires_in, "spotify.token.refreshed");
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }
}

pub fn is_expired(token: &Token, now: u64) -> bool {
    now + EXPIRY_BUFFER_SECS >= token.obtained_at + token.expires_in
}

/// Client-credentials grant against the Spotify accounts service.
pub async fn request_token(http: &Client, cfg: &SpotifyConfig) -> Result<Token, SyncError> {
    let basic = STANDARD.encode(format!("{}:{}", cfg.client_id, cfg.client_secret));

    let response = http
        .post(&cfg.token_url)
        .header(reqwest::header::AUTHORIZATION, format!("Basic {basic}"))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::SpotifyAuth(format!("token endpoint returned {status}")));
    }

    let json = response.json::<TokenResponse>().await?;

    Ok(Token {
        access_token: json.access_token,
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
