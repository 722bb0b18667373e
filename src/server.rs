use std::{net::SocketAddr, path::Path, str::FromStr, sync::Arc};

use axum::{Router, routing::get};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    Res, api,
    config::AppConfig,
    error::SyncError,
    management::{AnalyticsSink, JsonDocumentStore, PlaylistResolver},
    spotify::{MetadataProvider, SpotifyClient},
    utils,
    youtube::{TrackResolver, VideoProvider, YouTubeClient},
};

/// Everything a handler needs, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<dyn MetadataProvider>,
    pub resolver: Arc<TrackResolver>,
    pub playlists: PlaylistResolver,
    pub analytics: AnalyticsSink,
}

impl AppState {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        resolver: TrackResolver,
        playlist_concurrency: usize,
        analytics: AnalyticsSink,
    ) -> Self {
        let resolver = Arc::new(resolver);
        Self {
            metadata,
            playlists: PlaylistResolver::new(Arc::clone(&resolver), playlist_concurrency),
            resolver,
            analytics,
        }
    }

    /// Wires the real Spotify and YouTube clients around one shared
    /// connection pool.
    pub fn from_config(cfg: &AppConfig) -> Result<Self, SyncError> {
        let http = utils::http_client(&cfg.http)?;

        let metadata: Arc<dyn MetadataProvider> =
            Arc::new(SpotifyClient::new(http.clone(), &cfg.spotify));
        let provider: Arc<dyn VideoProvider> = Arc::new(YouTubeClient::new(http, &cfg.youtube));
        let resolver = TrackResolver::new(provider, cfg.youtube.credentials.clone());

        let analytics = if cfg.analytics.enabled {
            AnalyticsSink::new(Arc::new(JsonDocumentStore::new(
                cfg.analytics.store_path.clone(),
            )))
        } else {
            AnalyticsSink::disabled()
        };

        Ok(Self::new(
            metadata,
            resolver,
            cfg.playlist_concurrency,
            analytics,
        ))
    }
}

pub fn router(state: AppState, templates_dir: &Path) -> Router {
    Router::new()
        .route("/song", get(api::song))
        .route("/playlist", get(api::playlist))
        .route("/analytics", get(api::analytics))
        .route("/health", get(api::health))
        .route("/help", get(api::help))
        .route_service("/", ServeFile::new(templates_dir.join("index.html")))
        .route_service(
            "/favicon.ico",
            ServeFile::new(templates_dir.join("favicon.ico")),
        )
        .nest_service("/templates", ServeDir::new(templates_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(cfg: AppConfig) -> Res<()> {
    let state = AppState::from_config(&cfg)?;
    let app = router(state, &cfg.templates_dir);

    let addr = SocketAddr::from_str(&cfg.server_addr)
        .map_err(|e| SyncError::Config(format!("SERVER_ADDRESS {:?}: {e}", cfg.server_addr)))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, keys = cfg.youtube.credentials.len(), "server.listening");
    axum::serve(listener, app).await?;
    Ok(())
}
