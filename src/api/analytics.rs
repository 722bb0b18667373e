use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::warn;

use crate::server::AppState;

pub async fn analytics(State(state): State<AppState>) -> impl IntoResponse {
    let cache = [
        (header::CACHE_CONTROL, "public, max-age=60"),
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    ];

    match state.analytics.snapshot().await {
        Ok(Some(counters)) => (
            StatusCode::OK,
            cache,
            Json(json!({ "status": "success", "data": [counters] })),
        ),
        Ok(None) => (
            StatusCode::OK,
            cache,
            Json(json!({ "status": "success", "message": "No data found" })),
        ),
        Err(e) => {
            warn!(error = %e, "analytics.read.failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                cache,
                Json(json!({
                    "status": "error",
                    "message": format!("Failed to fetch analytics: {e}")
                })),
            )
        }
    }
}
