use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use melody_syncer::{
    config::SpotifyConfig,
    error::SyncError,
    spotify::{auth::TokenManager, tracks},
};
use reqwest::Client;
use serde_json::{Value, json};

#[derive(Clone)]
struct Stub {
    base: String,
    token_calls: Arc<AtomicUsize>,
    expires_in: u64,
}

fn track(id: &str) -> Value {
    json!({ "track": { "id": id, "name": format!("Song {id}"), "artists": [], "duration_ms": 1000 } })
}

async fn first_page(State(stub): State<Stub>, Path(id): Path<String>) -> Response {
    match id.as_str() {
        "p1" => Json(json!({
            "items": [track("t1"), track("t2")],
            "next": format!("{}/pages/p1-2", stub.base),
        }))
        .into_response(),
        "empty" => Json(json!({
            "items": [],
            "next": format!("{}/pages/empty-2", stub.base),
        }))
        .into_response(),
        "endless" => Json(json!({
            "items": [track("t1")],
            "next": format!("{}/playlists/endless/tracks", stub.base),
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn next_page(Path(page): Path<String>) -> Response {
    match page.as_str() {
        "p1-2" => Json(json!({ "items": [track("t3")], "next": null })).into_response(),
        "empty-2" => Json(json!({ "items": [], "next": null })).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn token(State(stub): State<Stub>, headers: HeaderMap) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=");
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let n = stub.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({
        "access_token": format!("token-{n}"),
        "token_type": "Bearer",
        "expires_in": stub.expires_in,
    }))
    .into_response()
}

async fn spawn_stub(expires_in: u64) -> Stub {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let stub = Stub {
        base,
        token_calls: Arc::new(AtomicUsize::new(0)),
        expires_in,
    };

    let app = Router::new()
        .route("/playlists/{id}/tracks", get(first_page))
        .route("/pages/{page}", get(next_page))
        .route("/token", post(token))
        .with_state(stub.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    stub
}

fn spotify_config(stub: &Stub, secret: &str) -> SpotifyConfig {
    SpotifyConfig {
        client_id: "client-id".to_string(),
        client_secret: secret.to_string(),
        api_url: stub.base.clone(),
        token_url: format!("{}/token", stub.base),
    }
}

#[tokio::test]
async fn test_playlist_follows_next_pages() {
    let stub = spawn_stub(3600).await;

    let items = tracks::get_playlist_items(&Client::new(), &stub.base, "token", "p1")
        .await
        .unwrap();

    let ids: Vec<String> = items
        .into_iter()
        .filter_map(|item| item.track.and_then(|t| t.id))
        .collect();
    assert_eq!(ids, vec!["t1", "t2", "t3"]);
}

#[tokio::test]
async fn test_playlist_pages_are_capped() {
    let stub = spawn_stub(3600).await;

    let items = tracks::get_playlist_items(&Client::new(), &stub.base, "token", "endless")
        .await
        .unwrap();

    // one item per page, the page that links to itself is followed 100 times
    assert_eq!(items.len(), 100);
}

#[tokio::test]
async fn test_playlist_with_only_empty_pages() {
    let stub = spawn_stub(3600).await;

    let err = tracks::get_playlist_items(&Client::new(), &stub.base, "token", "empty")
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::EmptyPlaylist));
}

#[tokio::test]
async fn test_unknown_playlist_is_not_found() {
    let stub = spawn_stub(3600).await;

    let err = tracks::get_playlist_items(&Client::new(), &stub.base, "token", "missing")
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::NotFound(_)));
}

#[tokio::test]
async fn test_token_is_reused_while_fresh() {
    let stub = spawn_stub(3600).await;
    let cfg = spotify_config(&stub, "client-secret");
    let http = Client::new();
    let tokens = TokenManager::new();

    let first = tokens.get_valid_token(&http, &cfg).await.unwrap();
    let second = tokens.get_valid_token(&http, &cfg).await.unwrap();

    assert_eq!(first, "token-1");
    assert_eq!(second, "token-1");
    assert_eq!(stub.token_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_token_inside_expiry_buffer_is_refreshed() {
    // expires in one minute, which is already within the two minute buffer
    let stub = spawn_stub(60).await;
    let cfg = spotify_config(&stub, "client-secret");
    let http = Client::new();
    let tokens = TokenManager::new();

    tokens.get_valid_token(&http, &cfg).await.unwrap();
    let second = tokens.get_valid_token(&http, &cfg).await.unwrap();

    assert_eq!(second, "token-2");
    assert_eq!(stub.token_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_rejected_client_credentials() {
    let stub = spawn_stub(3600).await;
    let cfg = spotify_config(&stub, "wrong-secret");

    let err = TokenManager::new()
        .get_valid_token(&Client::new(), &cfg)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::SpotifyAuth(_)));
    assert_eq!(stub.token_calls.load(Ordering::SeqCst), 0);
}
