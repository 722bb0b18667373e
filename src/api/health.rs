use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

/// Liveness probe. Reports how many YouTube keys the relay rotates through,
/// never the keys themselves.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "youtube_keys": state.resolver.credentials().len(),
        "analytics": state.analytics.is_enabled(),
    }))
}
