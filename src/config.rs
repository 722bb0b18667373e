//! Configuration management for MelodySyncer.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file. The hierarchy is:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the working directory
//! 3. `.env` in the local data directory (`melody-syncer/.env`)
//! 4. Application defaults (where applicable)
//!
//! Everything is read once into an [`AppConfig`] at startup and passed down
//! explicitly; nothing below this module touches the environment.

use std::{env, path::PathBuf, time::Duration};

use crate::{error::SyncError, youtube::CredentialPool};

pub const APP_DIR: &str = "melody-syncer";

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_YOUTUBE_API_URL: &str = "https://youtube.googleapis.com/youtube/v3";
const DEFAULT_PLAYLIST_CONCURRENCY: usize = 8;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 8;
const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 2;

/// Environment variables holding the YouTube credential pool, in rotation order.
pub const YOUTUBE_KEY_VARS: [&str; 5] = [
    "YOUTUBE_API_KEY",
    "YOUTUBE_API_KEY2",
    "YOUTUBE_API_KEY3",
    "YOUTUBE_API_KEY4",
    "YOUTUBE_API_KEY5",
];

/// Loads environment variables from `.env` files.
///
/// The working directory is tried first, then the platform-specific local data
/// directory under `melody-syncer/.env`:
/// - Linux: `~/.local/share/melody-syncer/.env`
/// - macOS: `~/Library/Application Support/melody-syncer/.env`
/// - Windows: `%LOCALAPPDATA%/melody-syncer/.env`
///
/// Missing files are not an error; variables may come from the process
/// environment alone.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or a `.env`
/// file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(e.to_string());
        }
    }

    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Directory for files the service owns (`.env`, analytics document).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
}

#[derive(Debug, Clone)]
pub struct YouTubeConfig {
    pub api_url: String,
    pub credentials: CredentialPool,
    /// Page size for searches; `None` keeps the provider default.
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_HTTP_CONNECT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub enabled: bool,
    pub store_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_addr: String,
    pub spotify: SpotifyConfig,
    pub youtube: YouTubeConfig,
    pub http: HttpConfig,
    pub analytics: AnalyticsConfig,
    pub playlist_concurrency: usize,
    pub templates_dir: PathBuf,
}

impl AppConfig {
    /// Builds the configuration from the current process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] if the Spotify credentials are missing, no
    /// YouTube key is configured, or a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, SyncError> {
        let spotify = SpotifyConfig {
            client_id: required("SPOTIPY_CLIENT_ID")?,
            client_secret: required("SPOTIPY_CLIENT_SECRET")?,
            api_url: trim_slash(env_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)),
            token_url: env_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
        };

        let keys: Vec<String> = YOUTUBE_KEY_VARS.iter().filter_map(|v| optional(v)).collect();
        if keys.is_empty() {
            return Err(SyncError::Config("YOUTUBE_API_KEY was not set".to_string()));
        }

        let youtube = YouTubeConfig {
            api_url: trim_slash(env_or("YOUTUBE_API_URL", DEFAULT_YOUTUBE_API_URL)),
            credentials: CredentialPool::new(keys),
            max_results: optional("YOUTUBE_SEARCH_MAX_RESULTS")
                .map(|v| parse_num("YOUTUBE_SEARCH_MAX_RESULTS", &v))
                .transpose()?,
        };

        let http = HttpConfig {
            timeout: Duration::from_secs(parse_or(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            connect_timeout: Duration::from_secs(parse_or(
                "HTTP_CONNECT_TIMEOUT_SECS",
                DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
            )?),
        };

        let analytics = AnalyticsConfig {
            enabled: optional("ANALYTICS_ENABLED")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
            store_path: optional("ANALYTICS_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir().join("analytics.json")),
        };

        let playlist_concurrency =
            parse_or("PLAYLIST_CONCURRENCY", DEFAULT_PLAYLIST_CONCURRENCY)?.max(1);

        Ok(AppConfig {
            server_addr: env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            spotify,
            youtube,
            http,
            analytics,
            playlist_concurrency,
            templates_dir: PathBuf::from(env_or("TEMPLATES_DIR", "templates")),
        })
    }
}

fn optional(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

fn required(name: &str) -> Result<String, SyncError> {
    optional(name).ok_or_else(|| SyncError::Config(format!("{name} was not set")))
}

fn env_or(name: &str, default: &str) -> String {
    optional(name).unwrap_or_else(|| default.to_string())
}

fn parse_num<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, SyncError> {
    value
        .parse::<T>()
        .map_err(|_| SyncError::Config(format!("{name} must be a number, got {value:?}")))
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, SyncError> {
    match optional(name) {
        Some(v) => parse_num(name, &v),
        None => Ok(default),
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
