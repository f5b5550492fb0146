use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy",
    }))
}

/// Liveness plus flag-backend connectivity. The service stays healthy when
/// Flipt is down; callers just see defaults.
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "flipt_connected": state.flags.is_connected().await,
    }))
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics.render()
}
